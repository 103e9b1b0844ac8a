//! Authentication HTTP handlers.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use novel_shared::api::AuthSuccessResponse;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

use super::AuthPayload;

/// Verify a Telegram login-widget payload.
///
/// Echoes the payload back on success. A missing or wrong signature is a 403,
/// a body that is not a flat JSON object is a 400.
pub async fn telegram_login(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<AuthSuccessResponse>> {
    let Json(body) = body?;
    let payload = AuthPayload::from_json(body)?;

    if !state.verifier.verify(&payload) {
        tracing::debug!(
            user_id = payload.user_id().unwrap_or("-"),
            has_hash = payload.hash().is_some(),
            "Rejected Telegram authorization"
        );
        return Err(ApiError::forbidden("Invalid Telegram authorization"));
    }

    tracing::info!(
        user_id = payload.user_id().unwrap_or("-"),
        "Telegram authorization successful"
    );

    Ok(Json(AuthSuccessResponse {
        message: "Authorization successful".to_string(),
        user: payload.into_raw(),
    }))
}
