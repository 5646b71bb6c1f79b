use axum::{routing::get, Router};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/report-settings",
        get(handlers::get_settings).post(handlers::upsert_settings),
    )
}
