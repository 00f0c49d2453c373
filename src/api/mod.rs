pub mod auth;
pub mod error;
pub mod todos;
pub mod token;
pub mod validation;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Auth routes (public): these establish identity, so they sit outside
    // the middleware
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Protected todo routes. The `:id` segment carries a date string for
    // GET (the API lists todos by day) and a todo id for PUT/DELETE.
    let todo_routes = Router::new()
        .route("/todos", post(todos::create_todo))
        .route(
            "/todos/:id",
            get(todos::list_for_date)
                .put(todos::set_completed)
                .delete(todos::delete_todo),
        )
        .route("/todos/:id/text", put(todos::set_text))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(auth_routes)
        .merge(todo_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
