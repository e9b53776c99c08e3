pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::resume::handlers::handle_analyze_resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview flow
        .route("/roles", get(handlers::handle_get_roles))
        .route("/skills", get(handlers::handle_get_skills))
        .route("/get_question", get(handlers::handle_get_question))
        .route("/evaluate", post(handlers::handle_evaluate))
        .route("/session/questions", get(handlers::handle_session_questions))
        .route("/dashboard", get(handlers::handle_dashboard))
        // Resume analyzer
        .route("/analyze_resume", post(handle_analyze_resume))
        // Admin
        .route("/admin/add-question", post(handlers::handle_add_question))
        .route("/admin/list-questions", get(handlers::handle_list_questions))
        .route("/admin/list-users", get(handlers::handle_list_users))
        .with_state(state)
}
