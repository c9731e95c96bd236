use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::{RequestId, SessionId};
use crate::models::{
    all_questions, FormattedOutfit, ItemQuestion, ItemQuestionType, Question, QuestionId,
    UserPreferences,
};
use crate::services::normalizer;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct TagRequest {
    pub tags: Vec<String>,
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub text: String,
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PreferencesRequest {
    pub preferences: UserPreferences,
    pub count: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub outfits: Vec<FormattedOutfit>,
    /// What the recommendations were based on
    pub source: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionRecommendationResponse {
    pub outfits: Vec<FormattedOutfit>,
}

#[derive(Debug, Deserialize)]
pub struct UserSelection {
    pub selection: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub message: String,
    pub current_preferences: UserPreferences,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// Handlers

/// Service information and endpoint listing
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Outfit Recommendation API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /recommendations/tags": "Recommend outfits from a list of tags",
            "POST /recommendations/question": "Recommend outfits from a free-text question",
            "POST /recommendations/preferences": "Recommend outfits from a preference object",
            "GET /questions": "Get all questionnaire questions",
            "GET /questions/:question_id": "Get a specific question",
            "POST /answers/:question_id": "Submit answer(s) to a specific question",
            "GET /item-specific-questions/:item_type/:question_type": "Get an item-specific question",
            "POST /item-specific-answers/:item_type/:question_type": "Submit answers to an item-specific question",
            "GET /preferences": "Get current session preferences",
            "POST /preferences": "Replace session preferences",
            "GET /recommendations": "Recommend outfits from session preferences",
            "POST /reset": "Reset the questionnaire session"
        }
    }))
}

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Recommend outfits for a list of tags
pub async fn recommend_from_tags(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<TagRequest>,
) -> Json<RecommendationResponse> {
    let count = request.count.unwrap_or(state.default_count);
    tracing::info!(
        request_id = %request_id,
        tag_count = request.tags.len(),
        count,
        "Processing tag recommendation request"
    );

    let outfits = state.recommender.recommend_from_tags(&request.tags, count);
    Json(RecommendationResponse {
        outfits: state.recommender.format(&outfits),
        source: format!("Tags: {}", request.tags.join(", ")),
        generated_at: Utc::now(),
    })
}

/// Recommend outfits for a free-text question
pub async fn recommend_from_question(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<QuestionRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    if request.text.trim().is_empty() {
        return Err(AppError::InvalidInput("Question text is empty".to_string()));
    }

    let count = request.count.unwrap_or(state.default_count);
    tracing::info!(
        request_id = %request_id,
        count,
        "Processing question recommendation request"
    );

    let outfits = state.recommender.recommend_from_question(&request.text, count);
    Ok(Json(RecommendationResponse {
        outfits: state.recommender.format(&outfits),
        source: format!("Question: {}", request.text),
        generated_at: Utc::now(),
    }))
}

/// Recommend outfits for a one-off preference object
pub async fn recommend_from_preferences(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<PreferencesRequest>,
) -> Json<RecommendationResponse> {
    let count = request.count.unwrap_or(state.default_count);
    let (tags, outfits) = state
        .recommender
        .recommend_from_preferences(&request.preferences, count);

    tracing::info!(
        request_id = %request_id,
        tag_count = tags.len(),
        returned = outfits.len(),
        "Processed preference recommendation request"
    );

    Json(RecommendationResponse {
        outfits: state.recommender.format(&outfits),
        source: format!("User preferences with {} extracted tags", tags.len()),
        generated_at: Utc::now(),
    })
}

/// All general questionnaire questions
pub async fn list_questions() -> Json<Vec<Question>> {
    Json(all_questions())
}

/// One general question
pub async fn get_question(Path(question_id): Path<String>) -> AppResult<Json<Question>> {
    let question: QuestionId = question_id
        .parse()
        .map_err(|_| AppError::NotFound(format!("Question ID '{}' not found", question_id)))?;
    Ok(Json(question.question()))
}

/// Record the answer to a general question in the caller's session
pub async fn submit_answer(
    State(state): State<AppState>,
    session: SessionId,
    Path(question_id): Path<String>,
    Json(selection): Json<UserSelection>,
) -> AppResult<Json<AnswerResponse>> {
    let question: QuestionId = question_id.parse()?;

    let current_preferences = state
        .sessions
        .update(
            session.as_str(),
            Box::new(move |prefs: &mut UserPreferences| -> AppResult<()> {
                prefs.apply_answer(question, &selection.selection)?;
                Ok(())
            }),
        )
        .await?;

    tracing::info!(session_id = session.as_str(), question = %question, "Answer recorded");

    Ok(Json(AnswerResponse {
        message: format!("Answer for {} recorded successfully", question),
        current_preferences,
    }))
}

/// Follow-up question for an item type
pub async fn get_item_question(
    Path((item_type, question_type)): Path<(String, String)>,
) -> AppResult<Json<ItemQuestion>> {
    let question_type: ItemQuestionType = question_type.parse()?;
    Ok(Json(question_type.question(&item_type)?))
}

/// Record the answer to an item-specific question
pub async fn submit_item_answer(
    State(state): State<AppState>,
    session: SessionId,
    Path((item_type, question_type)): Path<(String, String)>,
    Json(selection): Json<UserSelection>,
) -> AppResult<Json<AnswerResponse>> {
    let question_type: ItemQuestionType = question_type.parse()?;

    let item = item_type.clone();
    let current_preferences = state
        .sessions
        .update(
            session.as_str(),
            Box::new(move |prefs: &mut UserPreferences| -> AppResult<()> {
                prefs.apply_item_answer(&item, question_type, &selection.selection)?;
                Ok(())
            }),
        )
        .await?;

    tracing::info!(
        session_id = session.as_str(),
        item = %item_type,
        question_type = %question_type,
        "Item-specific answer recorded"
    );

    Ok(Json(AnswerResponse {
        message: format!(
            "Item-specific answer for {} {} recorded successfully",
            item_type, question_type
        ),
        current_preferences,
    }))
}

/// Current preferences of the caller's session, starting it if needed
pub async fn get_preferences(
    State(state): State<AppState>,
    session: SessionId,
) -> AppResult<Json<UserPreferences>> {
    let preferences = state
        .sessions
        .update(
            session.as_str(),
            Box::new(|_: &mut UserPreferences| -> AppResult<()> { Ok(()) }),
        )
        .await?;
    Ok(Json(preferences))
}

/// Replace the caller's preferences wholesale
pub async fn set_preferences(
    State(state): State<AppState>,
    session: SessionId,
    Json(preferences): Json<UserPreferences>,
) -> AppResult<Json<AnswerResponse>> {
    preferences.validate()?;
    state
        .sessions
        .put(session.as_str(), preferences.clone())
        .await;

    Ok(Json(AnswerResponse {
        message: "Preferences updated successfully".to_string(),
        current_preferences: preferences,
    }))
}

/// Recommend outfits from the caller's questionnaire answers
pub async fn session_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    session: SessionId,
) -> AppResult<Json<SessionRecommendationResponse>> {
    let preferences = state.sessions.get(session.as_str()).await.ok_or_else(|| {
        AppError::InvalidInput(
            "No preferences set. Please answer questionnaire first.".to_string(),
        )
    })?;

    let tags = normalizer::questionnaire_tags(&preferences);
    let outfits = state
        .recommender
        .recommend_from_tags(&tags, state.default_count);

    tracing::info!(
        request_id = %request_id,
        session_id = session.as_str(),
        tag_count = tags.len(),
        returned = outfits.len(),
        "Session recommendations generated"
    );

    Ok(Json(SessionRecommendationResponse {
        outfits: state.recommender.format(&outfits),
    }))
}

/// Start the caller's session over
pub async fn reset_session(
    State(state): State<AppState>,
    session: SessionId,
) -> Json<MessageResponse> {
    state.sessions.reset(session.as_str()).await;
    Json(MessageResponse {
        message: "Session reset successfully".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, CatalogEntry, InvalidSelectionError};
    use crate::services::session::MockSessionStore;
    use crate::services::Recommender;
    use std::sync::Arc;

    fn recommender() -> Recommender {
        Recommender::new(
            Catalog::from_entries(vec![
                CatalogEntry::new("casual, shirt", "Shirt", "q"),
                CatalogEntry::new("casual, jeans", "Jeans", "q"),
                CatalogEntry::new("casual, sneakers", "Sneakers", "q"),
            ])
            .unwrap(),
        )
    }

    fn state_with(store: MockSessionStore) -> AppState {
        AppState::with_sessions(recommender(), Arc::new(store))
    }

    #[tokio::test]
    async fn test_session_recommendations_require_preferences() {
        let mut store = MockSessionStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|_| None);

        let result = session_recommendations(
            State(state_with(store)),
            Extension(RequestId::new()),
            SessionId::default(),
        )
        .await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_session_recommendations_use_stored_preferences() {
        let mut store = MockSessionStore::new();
        store.expect_get().returning(|_| {
            Some(UserPreferences {
                specific_occasion: Some("Casual".to_string()),
                ..Default::default()
            })
        });

        let Json(response) = session_recommendations(
            State(state_with(store)),
            Extension(RequestId::new()),
            SessionId("bob".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(response.outfits.len(), 1);
        assert_eq!(response.outfits[0].outfit_number, 1);
    }

    #[tokio::test]
    async fn test_submit_answer_surfaces_invalid_selection() {
        let mut store = MockSessionStore::new();
        store.expect_update().times(1).returning(|_, update| {
            let mut prefs = UserPreferences::default();
            update(&mut prefs)?;
            Ok(prefs)
        });

        let result = submit_answer(
            State(state_with(store)),
            SessionId::default(),
            Path("favorite_colors".to_string()),
            Json(UserSelection {
                selection: ["Black", "Blue", "Brown", "Gray", "Green", "Pink"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }),
        )
        .await;
        assert!(matches!(
            result,
            Err(AppError::InvalidSelection(
                InvalidSelectionError::TooManySelections { max: 5, .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_unknown_question_skips_store() {
        let store = MockSessionStore::new();
        let result = submit_answer(
            State(state_with(store)),
            SessionId::default(),
            Path("shoe_size".to_string()),
            Json(UserSelection { selection: vec![] }),
        )
        .await;
        assert!(matches!(
            result,
            Err(AppError::InvalidSelection(InvalidSelectionError::UnknownQuestion(_)))
        ));
    }

    #[tokio::test]
    async fn test_set_preferences_validates_before_storing() {
        let mut store = MockSessionStore::new();
        store.expect_put().never();

        let preferences = UserPreferences {
            style_vibes: ["Boho", "Casual", "Formal", "Grunge"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ..Default::default()
        };
        let result = set_preferences(
            State(state_with(store)),
            SessionId::default(),
            Json(preferences),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_preferences_starts_session() {
        let mut store = MockSessionStore::new();
        store.expect_get().never();
        store.expect_update().times(1).returning(|_, update| {
            let mut prefs = UserPreferences::default();
            update(&mut prefs)?;
            Ok(prefs)
        });

        let Json(prefs) = get_preferences(State(state_with(store)), SessionId::default())
            .await
            .unwrap();
        assert!(prefs.is_empty());
    }

    #[tokio::test]
    async fn test_get_question_not_found() {
        let result = get_question(Path("unknown".to_string())).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
