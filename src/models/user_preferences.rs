use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use super::questionnaire::{
    canonical_option, InvalidSelectionError, ItemQuestionType, QuestionId, ITEM_TYPES,
};

/// Gender preference for clothing styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Men", alias = "men")]
    Men,
    #[serde(rename = "Women", alias = "women")]
    Women,
    #[serde(rename = "Prefer not to say", alias = "prefer not to say")]
    PreferNotToSay,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "Men",
            Gender::Women => "Women",
            Gender::PreferNotToSay => "Prefer not to say",
        }
    }

    /// Tag contributed to the query, if any
    pub fn tag(&self) -> Option<String> {
        match self {
            Gender::PreferNotToSay => None,
            other => Some(other.as_str().to_lowercase()),
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = InvalidSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "men" => Ok(Gender::Men),
            "women" => Ok(Gender::Women),
            "prefer not to say" => Ok(Gender::PreferNotToSay),
            _ => Err(InvalidSelectionError::UnknownOption {
                field: "gender".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Preferences for one item type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemPreferences {
    pub styles: Vec<String>,
    pub colors: Vec<String>,
    pub materials: Vec<String>,
    pub occasions: Vec<String>,
    pub seasons: Vec<String>,
}

impl ItemPreferences {
    pub fn values(&self, question_type: ItemQuestionType) -> &[String] {
        match question_type {
            ItemQuestionType::Styles => &self.styles,
            ItemQuestionType::Colors => &self.colors,
            ItemQuestionType::Materials => &self.materials,
            ItemQuestionType::Occasions => &self.occasions,
            ItemQuestionType::Seasons => &self.seasons,
        }
    }

    fn values_mut(&mut self, question_type: ItemQuestionType) -> &mut Vec<String> {
        match question_type {
            ItemQuestionType::Styles => &mut self.styles,
            ItemQuestionType::Colors => &mut self.colors,
            ItemQuestionType::Materials => &mut self.materials,
            ItemQuestionType::Occasions => &mut self.occasions,
            ItemQuestionType::Seasons => &mut self.seasons,
        }
    }

    /// Every value across all question types
    pub fn all_values(&self) -> impl Iterator<Item = &String> {
        ItemQuestionType::ALL
            .iter()
            .flat_map(move |qt| self.values(*qt).iter())
    }
}

/// Answers collected by the questionnaire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub gender: Option<Gender>,
    pub item_types: Vec<String>,
    pub style_vibes: Vec<String>,
    pub favorite_colors: Vec<String>,
    pub preferred_materials: Vec<String>,
    pub key_occasions: Vec<String>,
    pub primary_seasons: Vec<String>,
    /// Keyed by lowercase item type
    pub item_specific_preferences: BTreeMap<String, ItemPreferences>,
    pub specific_occasion: Option<String>,
    pub casual_outfit_style: Option<String>,
    pub formal_outfit_color: Option<String>,
}

impl UserPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no question has been answered
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Validates and stores the answer to a general question
    ///
    /// An empty selection skips a single-choice question and clears a
    /// multiple-choice one.
    pub fn apply_answer(
        &mut self,
        question: QuestionId,
        selection: &[String],
    ) -> Result<(), InvalidSelectionError> {
        let values = question.check(selection)?;
        let first = values.first().cloned();

        match question {
            QuestionId::Gender => {
                if let Some(value) = first {
                    self.gender = Some(value.parse()?);
                }
            }
            QuestionId::SpecificOccasion => {
                if first.is_some() {
                    self.specific_occasion = first;
                }
            }
            QuestionId::CasualOutfitStyle => {
                if first.is_some() {
                    self.casual_outfit_style = first;
                }
            }
            QuestionId::FormalOutfitColor => {
                if first.is_some() {
                    self.formal_outfit_color = first;
                }
            }
            QuestionId::ItemTypes => self.item_types = values,
            QuestionId::StyleVibes => self.style_vibes = values,
            QuestionId::FavoriteColors => self.favorite_colors = values,
            QuestionId::PreferredMaterials => self.preferred_materials = values,
            QuestionId::KeyOccasions => self.key_occasions = values,
            QuestionId::PrimarySeasons => self.primary_seasons = values,
        }
        Ok(())
    }

    /// Validates and stores the answer to an item-specific question
    pub fn apply_item_answer(
        &mut self,
        item: &str,
        question_type: ItemQuestionType,
        selection: &[String],
    ) -> Result<(), InvalidSelectionError> {
        let item = canonical_option(&ITEM_TYPES, item)
            .ok_or_else(|| InvalidSelectionError::UnknownItemType(item.to_string()))?;
        let values = question_type.check(item, selection)?;

        *self
            .item_specific_preferences
            .entry(item.to_lowercase())
            .or_default()
            .values_mut(question_type) = values;
        Ok(())
    }

    /// Checks a complete preference object against the questionnaire rules
    pub fn validate(&self) -> Result<(), InvalidSelectionError> {
        let multi = [
            (QuestionId::ItemTypes, &self.item_types),
            (QuestionId::StyleVibes, &self.style_vibes),
            (QuestionId::FavoriteColors, &self.favorite_colors),
            (QuestionId::PreferredMaterials, &self.preferred_materials),
            (QuestionId::KeyOccasions, &self.key_occasions),
            (QuestionId::PrimarySeasons, &self.primary_seasons),
        ];
        for (question, values) in multi {
            question.check(values)?;
        }

        let single = [
            (QuestionId::SpecificOccasion, &self.specific_occasion),
            (QuestionId::CasualOutfitStyle, &self.casual_outfit_style),
            (QuestionId::FormalOutfitColor, &self.formal_outfit_color),
        ];
        for (question, value) in single {
            if let Some(value) = value {
                question.check(std::slice::from_ref(value))?;
            }
        }

        for (item, prefs) in &self.item_specific_preferences {
            let item = canonical_option(&ITEM_TYPES, item)
                .ok_or_else(|| InvalidSelectionError::UnknownItemType(item.clone()))?;
            for question_type in ItemQuestionType::ALL {
                question_type.check(item, prefs.values(question_type))?;
            }
        }

        Ok(())
    }

    /// Whether `item` is among the selected item types, ignoring case
    pub fn has_item_type(&self, item: &str) -> bool {
        self.item_types.iter().any(|t| t.eq_ignore_ascii_case(item))
    }
}
