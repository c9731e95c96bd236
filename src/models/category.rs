use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Coarse outfit slot an item fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Topwear,
    Bottomwear,
    Footwear,
    Accessory,
}

impl Category {
    /// Slots every complete outfit must fill
    pub const MANDATORY: [Category; 3] =
        [Category::Topwear, Category::Bottomwear, Category::Footwear];

    pub const ALL: [Category; 4] = [
        Category::Topwear,
        Category::Bottomwear,
        Category::Footwear,
        Category::Accessory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Topwear => "topwear",
            Category::Bottomwear => "bottomwear",
            Category::Footwear => "footwear",
            Category::Accessory => "accessory",
        }
    }

    /// Label used by text output, e.g. "Topwear"
    pub fn label(&self) -> &'static str {
        match self {
            Category::Topwear => "Topwear",
            Category::Bottomwear => "Bottomwear",
            Category::Footwear => "Footwear",
            Category::Accessory => "Accessory",
        }
    }

    pub fn is_mandatory(&self) -> bool {
        !matches!(self, Category::Accessory)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fine-grained item keyword to category, in matching order
pub const CATEGORY_MAP: [(&str, Category); 13] = [
    ("shirt", Category::Topwear),
    ("jacket", Category::Topwear),
    ("blazer", Category::Topwear),
    ("suit", Category::Topwear),
    ("pants", Category::Bottomwear),
    ("skirt", Category::Bottomwear),
    ("jeans", Category::Bottomwear),
    ("boots", Category::Footwear),
    ("oxfords", Category::Footwear),
    ("sneakers", Category::Footwear),
    ("loafers", Category::Footwear),
    ("jewelry", Category::Accessory),
    ("scarf", Category::Accessory),
];

/// Query keywords that ask for an accessory
pub const ACCESSORY_TRIGGERS: [&str; 2] = ["jewelry", "scarf"];

/// Looks up the category of an item keyword
pub fn category_of(keyword: &str) -> Option<Category> {
    let keyword = keyword.to_lowercase();
    CATEGORY_MAP
        .iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, c)| *c)
}

/// Item keywords known to the category map
pub fn item_keywords() -> impl Iterator<Item = &'static str> {
    CATEGORY_MAP.iter().map(|(k, _)| *k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_keyword_maps_once() {
        let keywords: HashSet<&str> = item_keywords().collect();
        assert_eq!(keywords.len(), CATEGORY_MAP.len());
    }

    #[test]
    fn test_category_of() {
        assert_eq!(category_of("Blazer"), Some(Category::Topwear));
        assert_eq!(category_of("oxfords"), Some(Category::Footwear));
        assert_eq!(category_of("scarf"), Some(Category::Accessory));
        assert_eq!(category_of("hat"), None);
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::Bottomwear).unwrap();
        assert_eq!(json, "\"bottomwear\"");
    }

    #[test]
    fn test_accessory_is_optional() {
        assert!(Category::MANDATORY.iter().all(|c| c.is_mandatory()));
        assert!(!Category::Accessory.is_mandatory());
    }
}
