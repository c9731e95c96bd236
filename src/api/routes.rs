use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        // Stateless recommendations
        .route("/recommendations/tags", post(handlers::recommend_from_tags))
        .route("/recommendations/question", post(handlers::recommend_from_question))
        .route(
            "/recommendations/preferences",
            post(handlers::recommend_from_preferences),
        )
        // Questionnaire
        .route("/questions", get(handlers::list_questions))
        .route("/questions/:question_id", get(handlers::get_question))
        .route("/answers/:question_id", post(handlers::submit_answer))
        .route(
            "/item-specific-questions/:item_type/:question_type",
            get(handlers::get_item_question),
        )
        .route(
            "/item-specific-answers/:item_type/:question_type",
            post(handlers::submit_item_answer),
        )
        // Session
        .route(
            "/preferences",
            get(handlers::get_preferences).post(handlers::set_preferences),
        )
        .route("/recommendations", get(handlers::session_recommendations))
        .route("/reset", post(handlers::reset_session))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}
