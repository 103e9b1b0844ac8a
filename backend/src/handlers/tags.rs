use axum::{extract::State, Json};

use crate::error::ApiResult;
use crate::state::AppState;

/// All distinct novel tags, sorted.
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let tags = state.store.distinct_tags().await?;
    Ok(Json(tags.into_iter().collect()))
}
