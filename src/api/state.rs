use std::sync::Arc;

use crate::services::{
    recommender::DEFAULT_COUNT,
    session::{InMemorySessionStore, SessionStore},
    Recommender,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Immutable after startup, shared by every request
    pub recommender: Arc<Recommender>,
    pub sessions: Arc<dyn SessionStore>,
    /// Outfits per request when the client does not specify
    pub default_count: usize,
}

impl AppState {
    /// Creates state backed by an in-memory session store
    pub fn new(recommender: Recommender) -> Self {
        Self::with_sessions(recommender, Arc::new(InMemorySessionStore::new()))
    }

    pub fn with_sessions(recommender: Recommender, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            recommender: Arc::new(recommender),
            sessions,
            default_count: DEFAULT_COUNT,
        }
    }

    pub fn with_default_count(mut self, default_count: usize) -> Self {
        self.default_count = default_count;
        self
    }
}
