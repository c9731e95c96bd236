use crate::models::{
    category,
    questionnaire::{COLORS, MATERIALS, OCCASIONS, SEASONS, STYLES},
    Catalog,
};

use super::similarity::{best_match, score_all};
use super::vectorizer::{TermVector, VectorSpace};

/// Finds vocabulary terms mentioned anywhere in `question`
///
/// Matching is by case-insensitive substring, vocabulary by vocabulary
/// (item types, styles, colors, materials, occasions, seasons). A term that
/// belongs to two vocabularies, such as "casual", is reported twice.
pub fn vocabulary_tags(question: &str) -> Vec<String> {
    let question = question.to_lowercase();

    let styled = [
        &STYLES[..],
        &COLORS[..],
        &MATERIALS[..],
        &OCCASIONS[..],
        &SEASONS[..],
    ];

    category::item_keywords()
        .map(str::to_string)
        .chain(
            styled
                .into_iter()
                .flatten()
                .map(|term| term.to_lowercase()),
        )
        .filter(|term| question.contains(term.as_str()))
        .collect()
}

/// Splits a stored comma-separated tag string
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turns free-text questions into recommendation tags
#[derive(Debug, Clone)]
pub struct TagExtractor {
    question_space: VectorSpace,
    question_vectors: Vec<TermVector>,
}

impl TagExtractor {
    /// Fits the fallback space over the catalog's question texts
    pub fn new(catalog: &Catalog) -> Self {
        let question_space = VectorSpace::fit(catalog.question_texts());
        let question_vectors = catalog
            .question_texts()
            .map(|q| question_space.project(q))
            .collect();
        Self {
            question_space,
            question_vectors,
        }
    }

    /// Extracts tags from `question`
    ///
    /// When no vocabulary term matches, the tags of the catalog entry whose
    /// question text is most similar are reused instead.
    pub fn extract(&self, catalog: &Catalog, question: &str) -> Vec<String> {
        let tags = vocabulary_tags(question);
        if !tags.is_empty() {
            tracing::debug!(count = tags.len(), "Extracted vocabulary tags");
            return tags;
        }

        let query = self.question_space.project(question);
        let scores = score_all(&query, &self.question_vectors);
        let tags = best_match(&scores)
            .and_then(|index| catalog.get(index))
            .map(|entry| split_tags(&entry.tags))
            .unwrap_or_default();

        tracing::debug!(
            count = tags.len(),
            "No vocabulary match, reused tags of closest catalog question"
        );
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogEntry;

    #[test]
    fn test_casual_summer_party() {
        let tags = vocabulary_tags("What should I wear for a casual summer party?");
        assert!(tags.contains(&"casual".to_string()));
        assert!(tags.contains(&"summer".to_string()));
        assert!(tags.contains(&"party".to_string()));
        // "casual" is both a style and an occasion
        assert_eq!(tags.iter().filter(|t| *t == "casual").count(), 2);
    }

    #[test]
    fn test_case_insensitive_item_match() {
        let tags = vocabulary_tags("Do BOOTS go with a Blazer?");
        assert_eq!(tags, vec!["blazer", "boots"]);
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(
            split_tags(" formal, wool ,, blazer"),
            vec!["formal", "wool", "blazer"]
        );
    }

    #[test]
    fn test_fallback_to_closest_question() {
        let catalog = Catalog::from_entries(vec![
            CatalogEntry::new("formal, blazer", "Charcoal blazer", "Something for a job talk"),
            CatalogEntry::new("casual, jeans", "Relaxed jeans", "Something for a lazy weekend"),
        ])
        .unwrap();
        let extractor = TagExtractor::new(&catalog);

        let tags = extractor.extract(&catalog, "ideas for a lazy weekend");
        assert_eq!(tags, vec!["casual", "jeans"]);
    }

    #[test]
    fn test_fallback_ties_use_last_entry() {
        let catalog = Catalog::from_entries(vec![
            CatalogEntry::new("formal, blazer", "Charcoal blazer", "office attire"),
            CatalogEntry::new("casual, jeans", "Relaxed jeans", "weekend attire"),
            CatalogEntry::new("boho, skirt", "Tiered skirt", "festival attire"),
        ])
        .unwrap();
        let extractor = TagExtractor::new(&catalog);

        // equal non-zero scores
        assert_eq!(extractor.extract(&catalog, "attire"), vec!["boho", "skirt"]);
        // no shared words, every score is zero
        assert_eq!(extractor.extract(&catalog, "zzz qqq"), vec!["boho", "skirt"]);
    }

    #[test]
    fn test_vocabulary_match_skips_fallback() {
        let catalog = Catalog::from_entries(vec![CatalogEntry::new(
            "formal, blazer",
            "Charcoal blazer",
            "job talk",
        )])
        .unwrap();
        let extractor = TagExtractor::new(&catalog);
        assert_eq!(extractor.extract(&catalog, "red?"), vec!["red"]);
    }
}
