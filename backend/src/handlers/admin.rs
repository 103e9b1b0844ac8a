use axum::{extract::State, Json};
use novel_shared::api::MessageResponse;

use crate::error::ApiResult;
use crate::state::AppState;

/// Create the schema if it is missing. Safe to call repeatedly.
pub async fn init_db(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    state.store.init_schema().await?;
    Ok(Json(MessageResponse::new("Database initialized")))
}
