pub mod catalog;
pub mod category;
pub mod outfit;
pub mod questionnaire;
pub mod user_preferences;

pub use catalog::{Catalog, CatalogEntry, DataLoadError};
pub use category::{Category, ACCESSORY_TRIGGERS, CATEGORY_MAP};
pub use outfit::{format_outfits, FormattedOutfit, Outfit, ScoredEntry};
pub use questionnaire::{
    all_questions, InvalidSelectionError, ItemQuestion, ItemQuestionType, Question, QuestionId,
};
pub use user_preferences::{Gender, ItemPreferences, UserPreferences};
