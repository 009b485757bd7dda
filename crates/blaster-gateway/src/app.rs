use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_short_url_handler, index_handler, redirect_handler, remove_url_handler,
    update_url_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/create-short-url", post(create_short_url_handler))
            .route("/update-url", post(update_url_handler))
            .route("/remove-url", post(remove_url_handler))
            .route("/{short_url}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
