// src/routes.rs

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    handlers::{auth, questions, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, questions, quiz).
/// * Applies global middleware (Trace, CORS).
/// * Serves the static frontend from the public directory.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let question_routes = Router::new()
        .route("/subjects", get(questions::list_subjects))
        .route("/questions/{subject}", get(questions::get_subject_questions));

    let quiz_routes = Router::new()
        .route("/submit", post(quiz::submit_quiz))
        .route("/history/{email}", get(quiz::get_history))
        .route("/stats/{email}", get(quiz::get_stats));

    let serve_dir = ServeDir::new(&state.config.public_dir);

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api", question_routes)
        .nest("/api/quiz", quiz_routes)
        .fallback_service(serve_dir)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
