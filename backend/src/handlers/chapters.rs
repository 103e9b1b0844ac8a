use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use novel_shared::api::{ChapterCreatedResponse, CreateChapterRequest, ListChaptersQuery};
use novel_shared::models::{Chapter, ChapterView};
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn list_chapters(
    State(state): State<AppState>,
    query: Result<Query<ListChaptersQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Chapter>>> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let novel_id = query
        .novel_id
        .ok_or_else(|| ApiError::bad_request("Novel ID is required"))?;

    let chapters = state.store.list_chapters(novel_id).await?;
    Ok(Json(chapters))
}

/// A single chapter with links to the previous and next chapter.
pub async fn get_chapter(
    State(state): State<AppState>,
    ids: Result<Path<(i32, i32)>, PathRejection>,
) -> ApiResult<Json<ChapterView>> {
    let Path((novel_id, chapter_id)) = ids.map_err(|e| ApiError::bad_request(e.body_text()))?;

    state
        .store
        .get_chapter(novel_id, chapter_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Chapter {}", chapter_id)))
}

pub async fn create_chapter(
    State(state): State<AppState>,
    payload: Result<Json<CreateChapterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ChapterCreatedResponse>)> {
    let Json(payload) = payload?;
    payload.validate()?;

    let chapter = state.store.create_chapter(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ChapterCreatedResponse {
            message: "Chapter created".to_string(),
            chapter,
        }),
    ))
}
