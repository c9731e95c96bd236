pub mod extractor;
pub mod normalizer;
pub mod recommender;
pub mod session;
pub mod similarity;
pub mod vectorizer;

pub use recommender::Recommender;
pub use session::{InMemorySessionStore, SessionStore};
pub use vectorizer::{TermVector, VectorSpace};
