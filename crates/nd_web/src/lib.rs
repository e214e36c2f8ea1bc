use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::home))
        .route("/category/:name", get(handlers::category_page))
        .route("/search", get(handlers::search))
        .route("/generate-summary", post(handlers::generate_summary))
        .route("/admin", get(handlers::admin_panel))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use nd_core::{Article, Error, Result};
    pub use crate::AppState;
}
