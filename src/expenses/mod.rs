use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/expenses", post(handlers::create_expense))
        // GET takes a category id, PUT/DELETE an expense id; one axum route
        // serves both shapes.
        .route(
            "/expenses/:id",
            get(handlers::list_expenses)
                .put(handlers::update_expense)
                .delete(handlers::delete_expense),
        )
}
