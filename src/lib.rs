//! Outfit recommendations from a tagged wardrobe catalog.
//!
//! Catalog entries are ranked by TF-IDF cosine similarity against a tag
//! query and sampled into outfits, one item per clothing category. Queries
//! come from raw tags, a free-text question, or questionnaire answers.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
