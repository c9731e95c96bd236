use std::collections::{BTreeMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{
    format_outfits, Catalog, Category, FormattedOutfit, Outfit, ScoredEntry, UserPreferences,
    ACCESSORY_TRIGGERS, CATEGORY_MAP,
};

use super::extractor::TagExtractor;
use super::normalizer;
use super::similarity::score_all;
use super::vectorizer::{TermVector, VectorSpace};

/// Default number of outfits per request
pub const DEFAULT_COUNT: usize = 7;

/// Upper bound on outfits assembled per request
pub const DEFAULT_MAX_OUTFITS: usize = 7;

/// Candidate entries per category, best first
pub type CandidatePools = BTreeMap<Category, Vec<ScoredEntry>>;

/// Tag-similarity outfit recommender over a fixed catalog
///
/// Everything is computed at construction; the recommender is immutable
/// afterwards and can be shared between requests.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Catalog,
    tag_space: VectorSpace,
    tag_vectors: Vec<TermVector>,
    extractor: TagExtractor,
    max_outfits: usize,
}

impl Recommender {
    pub fn new(catalog: Catalog) -> Self {
        let tag_space = VectorSpace::fit(catalog.tag_texts());
        let tag_vectors = catalog.tag_texts().map(|t| tag_space.project(t)).collect();
        let extractor = TagExtractor::new(&catalog);

        tracing::info!(
            entries = catalog.len(),
            vocabulary = tag_space.vocabulary_size(),
            "Recommender initialized"
        );

        Self {
            catalog,
            tag_space,
            tag_vectors,
            extractor,
            max_outfits: DEFAULT_MAX_OUTFITS,
        }
    }

    pub fn with_max_outfits(mut self, max_outfits: usize) -> Self {
        self.max_outfits = max_outfits;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn max_outfits(&self) -> usize {
        self.max_outfits
    }

    /// Similarity of the joined tags to every catalog entry
    pub fn score<S: AsRef<str>>(&self, tags: &[S]) -> Vec<f64> {
        let query = self.tag_space.project(&join_tags(tags));
        score_all(&query, &self.tag_vectors)
    }

    /// Groups positively scored entries by category
    ///
    /// For each item keyword, entries whose tags contain it are ranked by
    /// score and the best `count` kept. An entry appears at most once in a
    /// category's pool.
    pub fn candidate_pools(&self, scores: &[f64], count: usize) -> CandidatePools {
        let lowered: Vec<String> = self
            .catalog
            .tag_texts()
            .map(str::to_lowercase)
            .collect();

        let mut pools: CandidatePools = Category::ALL.iter().map(|c| (*c, Vec::new())).collect();
        let mut seen: BTreeMap<Category, HashSet<usize>> = BTreeMap::new();

        for (keyword, category) in CATEGORY_MAP {
            let mut matching: Vec<ScoredEntry> = lowered
                .iter()
                .enumerate()
                .filter(|(_, tags)| tags.contains(keyword))
                .map(|(index, _)| ScoredEntry {
                    index,
                    score: scores.get(index).copied().unwrap_or(0.0),
                })
                .collect();

            // Stable, so equal scores keep catalog order
            matching.sort_by(|a, b| b.score.total_cmp(&a.score));
            matching.truncate(count);

            let seen = seen.entry(category).or_default();
            let pool = pools.entry(category).or_default();
            for entry in matching {
                if entry.score > 0.0 && seen.insert(entry.index) {
                    pool.push(entry);
                }
            }
        }

        pools
    }

    /// Recommends up to `count` complete outfits for `tags`
    pub fn recommend_from_tags<S: AsRef<str>>(&self, tags: &[S], count: usize) -> Vec<Outfit> {
        self.recommend_from_tags_with_rng(tags, count, &mut rand::thread_rng())
    }

    /// Same as [`Recommender::recommend_from_tags`] with a caller-supplied RNG
    ///
    /// Each round draws one unused candidate per mandatory category, plus an
    /// accessory when the query mentions one. Drawn entries are never reused
    /// within the call, so later rounds may come up short; incomplete rounds
    /// are dropped.
    pub fn recommend_from_tags_with_rng<S, R>(
        &self,
        tags: &[S],
        count: usize,
        rng: &mut R,
    ) -> Vec<Outfit>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let query = join_tags(tags).to_lowercase();
        let scores = self.score(tags);
        let pools = self.candidate_pools(&scores, count);
        let wants_accessory = ACCESSORY_TRIGGERS.iter().any(|t| query.contains(t));

        let mut used: BTreeMap<Category, HashSet<usize>> = BTreeMap::new();
        let mut outfits = Vec::new();

        for _ in 0..count.min(self.max_outfits) {
            let mut outfit = Outfit::new();

            for category in Category::MANDATORY {
                if let Some(entry) = draw(&pools, &mut used, category, rng) {
                    outfit.insert(category, entry);
                }
            }

            if wants_accessory {
                if let Some(entry) = draw(&pools, &mut used, Category::Accessory, rng) {
                    outfit.insert(Category::Accessory, entry);
                }
            }

            if outfit.is_complete() {
                outfits.push(outfit);
            }
        }

        tracing::debug!(
            tags = tags.len(),
            requested = count,
            returned = outfits.len(),
            "Assembled outfits"
        );

        outfits
    }

    /// Tags extracted from a free-text question
    pub fn extract_tags(&self, question: &str) -> Vec<String> {
        self.extractor.extract(&self.catalog, question)
    }

    pub fn recommend_from_question(&self, question: &str, count: usize) -> Vec<Outfit> {
        let tags = self.extract_tags(question);
        self.recommend_from_tags(&tags, count)
    }

    /// Recommends from a preference form; returns the tags used as well
    pub fn recommend_from_preferences(
        &self,
        prefs: &UserPreferences,
        count: usize,
    ) -> (Vec<String>, Vec<Outfit>) {
        let tags: Vec<String> = normalizer::normalize(prefs).into_iter().collect();
        let outfits = self.recommend_from_tags(&tags, count);
        (tags, outfits)
    }

    pub fn format(&self, outfits: &[Outfit]) -> Vec<FormattedOutfit> {
        format_outfits(&self.catalog, outfits)
    }
}

fn join_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Picks a random candidate of `category` not yet used in this request
fn draw<R: Rng + ?Sized>(
    pools: &CandidatePools,
    used: &mut BTreeMap<Category, HashSet<usize>>,
    category: Category,
    rng: &mut R,
) -> Option<ScoredEntry> {
    let used = used.entry(category).or_default();
    let available: Vec<&ScoredEntry> = pools
        .get(&category)?
        .iter()
        .filter(|e| !used.contains(&e.index))
        .collect();

    let entry = **available.choose(rng)?;
    used.insert(entry.index);
    Some(entry)
}
