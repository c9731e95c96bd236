use std::collections::BTreeSet;

use crate::models::UserPreferences;

/// Flattens preferences into a deduplicated set of lowercase tags
///
/// Item-specific values only count for items that are also selected in
/// `item_types`.
pub fn normalize(prefs: &UserPreferences) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();

    if let Some(tag) = prefs.gender.and_then(|g| g.tag()) {
        tags.insert(tag);
    }

    let general = [
        &prefs.item_types,
        &prefs.style_vibes,
        &prefs.favorite_colors,
        &prefs.preferred_materials,
        &prefs.key_occasions,
        &prefs.primary_seasons,
    ];
    tags.extend(general.into_iter().flatten().map(|v| v.to_lowercase()));

    for (item, item_prefs) in &prefs.item_specific_preferences {
        if prefs.has_item_type(item) {
            tags.extend(item_prefs.all_values().map(|v| v.to_lowercase()));
        }
    }

    tags
}

/// Tags for a completed questionnaire
///
/// Adds the specific occasion to the normalized preferences, the casual
/// outfit style when that occasion is Casual, and the formal outfit color
/// when it is a Wedding or an Interview.
pub fn questionnaire_tags(prefs: &UserPreferences) -> Vec<String> {
    let mut tags: Vec<String> = normalize(prefs).into_iter().collect();

    let Some(occasion) = prefs.specific_occasion.as_deref() else {
        return tags;
    };
    tags.push(occasion.to_lowercase());

    if occasion.eq_ignore_ascii_case("casual") {
        if let Some(style) = &prefs.casual_outfit_style {
            tags.push(style.to_lowercase());
        }
    }

    if occasion.eq_ignore_ascii_case("wedding") || occasion.eq_ignore_ascii_case("interview") {
        if let Some(color) = &prefs.formal_outfit_color {
            tags.push(color.to_lowercase());
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, ItemPreferences};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample() -> UserPreferences {
        UserPreferences {
            gender: Some(Gender::Men),
            item_types: strings(&["Blazer", "Pants", "Oxfords"]),
            style_vibes: strings(&["Formal", "Elegant"]),
            favorite_colors: strings(&["Blue", "Black"]),
            preferred_materials: strings(&["Cotton", "Wool"]),
            key_occasions: strings(&["Interview", "Office"]),
            primary_seasons: strings(&["Autumn", "Winter"]),
            ..Default::default()
        }
    }

    #[test]
    fn test_flattens_every_field() {
        let tags = normalize(&sample());
        for tag in ["men", "blazer", "formal", "blue", "cotton", "interview", "autumn"] {
            assert!(tags.contains(tag), "missing {tag}");
        }
    }

    #[test]
    fn test_prefer_not_to_say_adds_no_gender() {
        let prefs = UserPreferences {
            gender: Some(Gender::PreferNotToSay),
            ..sample()
        };
        let tags = normalize(&prefs);
        assert!(!tags.contains("men"));
        assert!(!tags.iter().any(|t| t.contains("prefer")));
    }

    #[test]
    fn test_deduplicates() {
        let prefs = UserPreferences {
            style_vibes: strings(&["Casual"]),
            key_occasions: strings(&["Casual"]),
            ..Default::default()
        };
        assert_eq!(normalize(&prefs).len(), 1);
    }

    #[test]
    fn test_item_specific_only_for_selected_items() {
        let mut prefs = sample();
        prefs.item_specific_preferences.insert(
            "blazer".to_string(),
            ItemPreferences {
                colors: strings(&["Gray"]),
                ..Default::default()
            },
        );
        prefs.item_specific_preferences.insert(
            "boots".to_string(),
            ItemPreferences {
                materials: strings(&["Suede"]),
                ..Default::default()
            },
        );

        let tags = normalize(&prefs);
        assert!(tags.contains("gray"));
        assert!(!tags.contains("suede"));
    }

    #[test]
    fn test_questionnaire_formal_color_for_wedding() {
        let prefs = UserPreferences {
            specific_occasion: Some("Wedding".to_string()),
            casual_outfit_style: Some("Boho".to_string()),
            formal_outfit_color: Some("Purple".to_string()),
            ..Default::default()
        };
        let tags = questionnaire_tags(&prefs);
        assert_eq!(tags, strings(&["wedding", "purple"]));
    }

    #[test]
    fn test_questionnaire_casual_style() {
        let prefs = UserPreferences {
            specific_occasion: Some("Casual".to_string()),
            casual_outfit_style: Some("Grunge".to_string()),
            formal_outfit_color: Some("White".to_string()),
            ..Default::default()
        };
        let tags = questionnaire_tags(&prefs);
        assert_eq!(tags, strings(&["casual", "grunge"]));
    }

    #[test]
    fn test_questionnaire_without_occasion_ignores_extras() {
        let prefs = UserPreferences {
            casual_outfit_style: Some("Grunge".to_string()),
            ..Default::default()
        };
        assert!(questionnaire_tags(&prefs).is_empty());
    }
}
