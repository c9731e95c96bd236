use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::{error::AppResult, models::UserPreferences};

/// Session used when a client does not send one
pub const DEFAULT_SESSION_ID: &str = "default";

/// Read-modify-write step applied to a session's preferences
pub type PreferenceUpdate = Box<dyn FnOnce(&mut UserPreferences) -> AppResult<()> + Send>;

/// Storage for questionnaire answers, keyed by session id
///
/// Implementations must serialize `update` calls per session so that
/// concurrent answers to the same session are not lost.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Preferences of a session, if it exists
    async fn get(&self, session_id: &str) -> Option<UserPreferences>;

    /// Replaces a session's preferences
    async fn put(&self, session_id: &str, preferences: UserPreferences);

    /// Starts a session over with empty preferences
    async fn reset(&self, session_id: &str);

    /// Applies `update` under the session lock, creating the session if needed
    ///
    /// The stored preferences are left untouched when `update` fails.
    async fn update(
        &self,
        session_id: &str,
        update: PreferenceUpdate,
    ) -> AppResult<UserPreferences>;
}

/// Process-local session store with one lock per session
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<UserPreferences>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, session_id: &str) -> Arc<Mutex<UserPreferences>> {
        if let Some(slot) = self.sessions.read().await.get(session_id) {
            return slot.clone();
        }
        self.sessions
            .write()
            .await
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Option<UserPreferences> {
        let slot = self.sessions.read().await.get(session_id).cloned()?;
        let preferences = slot.lock().await.clone();
        Some(preferences)
    }

    async fn put(&self, session_id: &str, preferences: UserPreferences) {
        let slot = self.slot(session_id).await;
        *slot.lock().await = preferences;
    }

    async fn reset(&self, session_id: &str) {
        self.put(session_id, UserPreferences::default()).await;
        tracing::debug!(session_id, "Session reset");
    }

    async fn update(
        &self,
        session_id: &str,
        update: PreferenceUpdate,
    ) -> AppResult<UserPreferences> {
        let slot = self.slot(session_id).await;
        let mut guard = slot.lock().await;

        let mut next = guard.clone();
        update(&mut next)?;
        *guard = next.clone();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{InvalidSelectionError, QuestionId};

    #[test]
    fn test_unknown_session_is_absent() {
        let store = InMemorySessionStore::new();
        assert!(tokio_test::block_on(store.get("nobody")).is_none());
    }

    #[test]
    fn test_put_and_reset() {
        let store = InMemorySessionStore::new();
        tokio_test::block_on(async {
            let prefs = UserPreferences {
                style_vibes: vec!["Boho".to_string()],
                ..Default::default()
            };
            store.put("a", prefs.clone()).await;
            assert_eq!(store.get("a").await, Some(prefs));

            store.reset("a").await;
            assert_eq!(store.get("a").await, Some(UserPreferences::default()));
        });
    }

    #[test]
    fn test_update_creates_session() {
        let store = InMemorySessionStore::new();
        let updated = tokio_test::block_on(store.update(
            DEFAULT_SESSION_ID,
            Box::new(|prefs: &mut UserPreferences| -> AppResult<()> {
                prefs.apply_answer(QuestionId::Gender, &["Men".to_string()])?;
                Ok(())
            }),
        ))
        .unwrap();
        assert!(updated.gender.is_some());
        assert_eq!(tokio_test::block_on(store.len()), 1);
    }

    #[test]
    fn test_failed_update_leaves_session_untouched() {
        let store = InMemorySessionStore::new();
        tokio_test::block_on(async {
            store
                .put(
                    "s",
                    UserPreferences {
                        favorite_colors: vec!["Red".to_string()],
                        ..Default::default()
                    },
                )
                .await;

            let result = store
                .update(
                    "s",
                    Box::new(|prefs: &mut UserPreferences| -> AppResult<()> {
                        prefs.favorite_colors.clear();
                        Err(AppError::InvalidSelection(
                            InvalidSelectionError::UnknownQuestion("x".to_string()),
                        ))
                    }),
                )
                .await;
            assert!(result.is_err());
            assert_eq!(
                store.get("s").await.unwrap().favorite_colors,
                vec!["Red".to_string()]
            );
        });
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_serialized() {
        let store = Arc::new(InMemorySessionStore::new());
        let mut tasks = Vec::new();

        for _ in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store
                    .update(
                        "shared",
                        Box::new(|prefs: &mut UserPreferences| -> AppResult<()> {
                            prefs.key_occasions.push("Party".to_string());
                            Ok(())
                        }),
                    )
                    .await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let prefs = store.get("shared").await.unwrap();
        assert_eq!(prefs.key_occasions.len(), 16);
    }
}
