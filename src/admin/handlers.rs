use axum::{extract::State, Json};
use tracing::instrument;

use crate::{
    admin::repo::{self, AdminExpense},
    auth::extractors::AdminUser,
    error::ApiError,
    state::AppState,
};

#[instrument(skip_all)]
pub async fn all_expenses(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<Vec<AdminExpense>>, ApiError> {
    let rows = repo::list_all_expenses(&state.db).await?;
    Ok(Json(rows))
}
