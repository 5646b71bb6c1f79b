use axum::{routing::get, Router};

use crate::state::AppState;

pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new().route("/all-expenses", get(handlers::all_expenses))
}
