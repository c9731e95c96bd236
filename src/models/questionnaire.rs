use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

pub const GENDERS: [&str; 3] = ["Men", "Women", "Prefer not to say"];
pub const ITEM_TYPES: [&str; 10] = [
    "Blazer", "Boots", "Jacket", "Jewelry", "Oxfords", "Pants", "Scarf", "Skirt", "Sneakers",
    "Suit",
];
pub const STYLES: [&str; 8] = [
    "Athleisure", "Boho", "Casual", "Elegant", "Formal", "Grunge", "Preppy", "Vintage",
];
pub const COLORS: [&str; 10] = [
    "Black", "Blue", "Brown", "Gray", "Green", "Pink", "Purple", "Red", "White", "Yellow",
];
pub const MATERIALS: [&str; 8] = [
    "Cotton", "Denim", "Leather", "Linen", "Nylon", "Silk", "Suede", "Wool",
];
pub const OCCASIONS: [&str; 9] = [
    "Casual", "Concert", "Date", "Indoor", "Interview", "Office", "Outdoor", "Party", "Wedding",
];
pub const SEASONS: [&str; 4] = ["Autumn", "Spring", "Summer", "Winter"];

/// A selection that breaks the questionnaire rules
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidSelectionError {
    #[error("{field} allows maximum {max} selections, got {got}")]
    TooManySelections {
        field: String,
        max: usize,
        got: usize,
    },

    #[error("Question {0} only accepts a single selection")]
    SingleSelectionOnly(String),

    #[error("'{value}' is not a valid option for {field}")]
    UnknownOption { field: String, value: String },

    #[error("Invalid question ID: {0}")]
    UnknownQuestion(String),

    #[error("Invalid item type: {0}")]
    UnknownItemType(String),

    #[error("Invalid question type: {0}")]
    UnknownQuestionType(String),
}

/// Finds the display form of `value` in `options`, ignoring case
pub fn canonical_option(options: &[&'static str], value: &str) -> Option<&'static str> {
    let value = value.trim();
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(value))
        .copied()
}

/// Checks count and vocabulary of a selection, returning canonical values
pub(crate) fn check_selection(
    field: &str,
    options: &[&'static str],
    max_selections: Option<usize>,
    selection: &[String],
) -> Result<Vec<String>, InvalidSelectionError> {
    if let Some(max) = max_selections {
        if selection.len() > max {
            return Err(InvalidSelectionError::TooManySelections {
                field: field.to_string(),
                max,
                got: selection.len(),
            });
        }
    }

    selection
        .iter()
        .map(|value| {
            canonical_option(options, value)
                .map(str::to_string)
                .ok_or_else(|| InvalidSelectionError::UnknownOption {
                    field: field.to_string(),
                    value: value.clone(),
                })
        })
        .collect()
}

/// The general questions of the questionnaire, in asking order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    SpecificOccasion,
    Gender,
    ItemTypes,
    StyleVibes,
    FavoriteColors,
    PreferredMaterials,
    KeyOccasions,
    PrimarySeasons,
    CasualOutfitStyle,
    FormalOutfitColor,
}

impl QuestionId {
    pub const ALL: [QuestionId; 10] = [
        QuestionId::SpecificOccasion,
        QuestionId::Gender,
        QuestionId::ItemTypes,
        QuestionId::StyleVibes,
        QuestionId::FavoriteColors,
        QuestionId::PreferredMaterials,
        QuestionId::KeyOccasions,
        QuestionId::PrimarySeasons,
        QuestionId::CasualOutfitStyle,
        QuestionId::FormalOutfitColor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionId::SpecificOccasion => "specific_occasion",
            QuestionId::Gender => "gender",
            QuestionId::ItemTypes => "item_types",
            QuestionId::StyleVibes => "style_vibes",
            QuestionId::FavoriteColors => "favorite_colors",
            QuestionId::PreferredMaterials => "preferred_materials",
            QuestionId::KeyOccasions => "key_occasions",
            QuestionId::PrimarySeasons => "primary_seasons",
            QuestionId::CasualOutfitStyle => "casual_outfit_style",
            QuestionId::FormalOutfitColor => "formal_outfit_color",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            QuestionId::SpecificOccasion => {
                "What's the occasion you're looking for outfit recommendations for?"
            }
            QuestionId::Gender => "What is your gender preference for clothing styles?",
            QuestionId::ItemTypes => {
                "Which clothing or accessory items are you interested in? Select all that apply."
            }
            QuestionId::StyleVibes => {
                "What style vibes do you generally prefer across your wardrobe? Select up to 3."
            }
            QuestionId::FavoriteColors => "What colors do you love to wear? Select up to 5.",
            QuestionId::PreferredMaterials => {
                "What fabrics or materials do you prefer for your clothing? Select up to 3."
            }
            QuestionId::KeyOccasions => {
                "For which occasions do you often need outfits? Select all that apply."
            }
            QuestionId::PrimarySeasons => {
                "Which seasons do you primarily shop for or style outfits for? Select all that apply."
            }
            QuestionId::CasualOutfitStyle => {
                "For a casual occasion in your favorite season, what style vibe do you prefer for an outfit?"
            }
            QuestionId::FormalOutfitColor => {
                "For a formal event like a wedding or interview, what color do you prefer for your main clothing item?"
            }
        }
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self {
            QuestionId::SpecificOccasion | QuestionId::KeyOccasions => &OCCASIONS,
            QuestionId::Gender => &GENDERS,
            QuestionId::ItemTypes => &ITEM_TYPES,
            QuestionId::StyleVibes | QuestionId::CasualOutfitStyle => &STYLES,
            QuestionId::FavoriteColors | QuestionId::FormalOutfitColor => &COLORS,
            QuestionId::PreferredMaterials => &MATERIALS,
            QuestionId::PrimarySeasons => &SEASONS,
        }
    }

    pub fn allow_multiple(&self) -> bool {
        !matches!(
            self,
            QuestionId::SpecificOccasion
                | QuestionId::Gender
                | QuestionId::CasualOutfitStyle
                | QuestionId::FormalOutfitColor
        )
    }

    pub fn max_selections(&self) -> Option<usize> {
        match self {
            QuestionId::StyleVibes | QuestionId::PreferredMaterials => Some(3),
            QuestionId::FavoriteColors => Some(5),
            _ => None,
        }
    }

    pub fn question(&self) -> Question {
        Question {
            id: self.as_str().to_string(),
            question: self.text().to_string(),
            options: self.options().to_vec(),
            allow_multiple: self.allow_multiple(),
            max_selections: self.max_selections(),
        }
    }

    /// Validates a selection and returns it in canonical form
    pub fn check(&self, selection: &[String]) -> Result<Vec<String>, InvalidSelectionError> {
        if !self.allow_multiple() && selection.len() > 1 {
            return Err(InvalidSelectionError::SingleSelectionOnly(
                self.as_str().to_string(),
            ));
        }
        check_selection(
            self.as_str(),
            self.options(),
            self.max_selections(),
            selection,
        )
    }
}

impl Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionId {
    type Err = InvalidSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionId::ALL
            .iter()
            .find(|q| q.as_str() == s)
            .copied()
            .ok_or_else(|| InvalidSelectionError::UnknownQuestion(s.to_string()))
    }
}

/// Follow-up questions asked for each selected item type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemQuestionType {
    Styles,
    Colors,
    Materials,
    Occasions,
    Seasons,
}

impl ItemQuestionType {
    pub const ALL: [ItemQuestionType; 5] = [
        ItemQuestionType::Styles,
        ItemQuestionType::Colors,
        ItemQuestionType::Materials,
        ItemQuestionType::Occasions,
        ItemQuestionType::Seasons,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemQuestionType::Styles => "styles",
            ItemQuestionType::Colors => "colors",
            ItemQuestionType::Materials => "materials",
            ItemQuestionType::Occasions => "occasions",
            ItemQuestionType::Seasons => "seasons",
        }
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self {
            ItemQuestionType::Styles => &STYLES,
            ItemQuestionType::Colors => &COLORS,
            ItemQuestionType::Materials => &MATERIALS,
            ItemQuestionType::Occasions => &OCCASIONS,
            ItemQuestionType::Seasons => &SEASONS,
        }
    }

    pub fn max_selections(&self) -> Option<usize> {
        match self {
            ItemQuestionType::Styles | ItemQuestionType::Materials => Some(2),
            ItemQuestionType::Colors => Some(3),
            ItemQuestionType::Occasions | ItemQuestionType::Seasons => None,
        }
    }

    pub fn text(&self, item: &str) -> String {
        match self {
            ItemQuestionType::Styles => {
                format!("Which style vibes do you prefer for {item}? Select up to 2.")
            }
            ItemQuestionType::Colors => {
                format!("Which colors do you prefer for {item}? Select up to 3.")
            }
            ItemQuestionType::Materials => {
                format!("Which materials do you prefer for {item}? Select up to 2.")
            }
            ItemQuestionType::Occasions => {
                format!("For which occasions do you wear {item}? Select all that apply.")
            }
            ItemQuestionType::Seasons => {
                format!("For which seasons do you wear {item}? Select all that apply.")
            }
        }
    }

    /// Builds the follow-up question for an item type
    pub fn question(&self, item: &str) -> Result<ItemQuestion, InvalidSelectionError> {
        let item = canonical_option(&ITEM_TYPES, item)
            .ok_or_else(|| InvalidSelectionError::UnknownItemType(item.to_string()))?;

        Ok(ItemQuestion {
            id: format!("{}_{}", item.to_lowercase(), self.as_str()),
            item: item.to_string(),
            question_type: *self,
            question: self.text(item),
            options: self.options().to_vec(),
            allow_multiple: true,
            max_selections: self.max_selections(),
        })
    }

    pub fn check(
        &self,
        item: &str,
        selection: &[String],
    ) -> Result<Vec<String>, InvalidSelectionError> {
        check_selection(
            &format!("{} for {}", self.as_str(), item),
            self.options(),
            self.max_selections(),
            selection,
        )
    }
}

impl Display for ItemQuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemQuestionType {
    type Err = InvalidSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemQuestionType::ALL
            .iter()
            .find(|q| q.as_str() == s)
            .copied()
            .ok_or_else(|| InvalidSelectionError::UnknownQuestionType(s.to_string()))
    }
}

/// A general question as presented to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: String,
    pub question: String,
    pub options: Vec<&'static str>,
    pub allow_multiple: bool,
    pub max_selections: Option<usize>,
}

/// An item-specific follow-up question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemQuestion {
    pub id: String,
    pub item: String,
    pub question_type: ItemQuestionType,
    pub question: String,
    pub options: Vec<&'static str>,
    pub allow_multiple: bool,
    pub max_selections: Option<usize>,
}

/// All general questions, in asking order
pub fn all_questions() -> Vec<Question> {
    QuestionId::ALL.iter().map(QuestionId::question).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_question_id_round_trip() {
        for id in QuestionId::ALL {
            assert_eq!(id.as_str().parse::<QuestionId>().unwrap(), id);
        }
        assert!(matches!(
            "shoe_size".parse::<QuestionId>(),
            Err(InvalidSelectionError::UnknownQuestion(_))
        ));
    }

    #[test]
    fn test_style_vibes_limit() {
        let result =
            QuestionId::StyleVibes.check(&sel(&["Boho", "Casual", "Formal", "Vintage"]));
        assert_eq!(
            result,
            Err(InvalidSelectionError::TooManySelections {
                field: "style_vibes".to_string(),
                max: 3,
                got: 4,
            })
        );
    }

    #[test]
    fn test_single_choice_rejects_many() {
        let result = QuestionId::Gender.check(&sel(&["Men", "Women"]));
        assert!(matches!(
            result,
            Err(InvalidSelectionError::SingleSelectionOnly(_))
        ));
    }

    #[test]
    fn test_canonicalizes_case() {
        let values = QuestionId::FavoriteColors.check(&sel(&["blue", "BLACK"])).unwrap();
        assert_eq!(values, sel(&["Blue", "Black"]));
    }

    #[test]
    fn test_unknown_option() {
        let result = QuestionId::PrimarySeasons.check(&sel(&["Monsoon"]));
        assert!(matches!(
            result,
            Err(InvalidSelectionError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_item_question() {
        let question = ItemQuestionType::Colors.question("blazer").unwrap();
        assert_eq!(question.id, "blazer_colors");
        assert_eq!(question.item, "Blazer");
        assert_eq!(question.max_selections, Some(3));
        assert!(ItemQuestionType::Colors.question("hat").is_err());
    }

    #[test]
    fn test_item_limits() {
        let result = ItemQuestionType::Materials.check("Boots", &sel(&["Leather", "Suede", "Wool"]));
        assert!(matches!(
            result,
            Err(InvalidSelectionError::TooManySelections { max: 2, .. })
        ));
        assert!(ItemQuestionType::Seasons
            .check("Boots", &sel(&["Autumn", "Spring", "Summer", "Winter"]))
            .is_ok());
    }

    #[test]
    fn test_all_questions_listed() {
        let questions = all_questions();
        assert_eq!(questions.len(), 10);
        assert_eq!(questions[0].id, "specific_occasion");
        assert!(!questions[1].allow_multiple);
    }
}
