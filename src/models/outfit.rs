use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Catalog, Category};

/// A catalog entry with its similarity to the current query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredEntry {
    /// Position of the entry in the catalog
    pub index: usize,
    /// Cosine similarity in [0, 1]
    pub score: f64,
}

/// One outfit: at most one entry per category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outfit {
    items: BTreeMap<Category, ScoredEntry>,
}

impl Outfit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category, entry: ScoredEntry) {
        self.items.insert(category, entry);
    }

    pub fn get(&self, category: Category) -> Option<&ScoredEntry> {
        self.items.get(&category)
    }

    /// True when topwear, bottomwear and footwear are all present
    pub fn is_complete(&self) -> bool {
        Category::MANDATORY
            .iter()
            .all(|c| self.items.contains_key(c))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &ScoredEntry)> {
        self.items.iter().map(|(c, e)| (*c, e))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Presentation form of an outfit, shared by the API and the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedOutfit {
    /// 1-based position in the response
    pub outfit_number: usize,
    /// Category name to the chosen item's description
    pub components: BTreeMap<Category, String>,
}

/// Reduces outfits to display strings, numbering them from 1
pub fn format_outfits(catalog: &Catalog, outfits: &[Outfit]) -> Vec<FormattedOutfit> {
    outfits
        .iter()
        .enumerate()
        .map(|(i, outfit)| FormattedOutfit {
            outfit_number: i + 1,
            components: outfit
                .iter()
                .filter_map(|(category, entry)| {
                    catalog
                        .get(entry.index)
                        .map(|e| (category, e.answer.clone()))
                })
                .collect(),
        })
        .collect()
}
