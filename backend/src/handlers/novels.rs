use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use novel_shared::api::{CreateNovelRequest, ListNovelsQuery, NovelCreatedResponse};
use novel_shared::models::{Novel, NovelDetail};
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::{Page, MAX_PAGE_SIZE};

/// Resolve `page`/`pageSize` query parameters, defaulting to the first ten.
fn resolve_page(query: &ListNovelsQuery) -> ApiResult<Page> {
    let defaults = Page::default();
    let page = query.page.unwrap_or(defaults.page);
    let page_size = query.page_size.unwrap_or(defaults.page_size);

    if page < 1 {
        return Err(ApiError::bad_request("page must be at least 1"));
    }
    if page_size < 1 {
        return Err(ApiError::bad_request("pageSize must be at least 1"));
    }

    let resolved = Page {
        page,
        page_size: page_size.min(MAX_PAGE_SIZE),
    };
    if resolved.checked_offset().is_none() {
        return Err(ApiError::bad_request("page is too large"));
    }

    Ok(resolved)
}

pub async fn list_novels(
    State(state): State<AppState>,
    query: Result<Query<ListNovelsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Novel>>> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let page = resolve_page(&query)?;

    let novels = state.store.list_novels(page).await?;
    Ok(Json(novels))
}

pub async fn get_novel(
    State(state): State<AppState>,
    novel_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<NovelDetail>> {
    let Path(novel_id) = novel_id.map_err(|e| ApiError::bad_request(e.body_text()))?;

    state
        .store
        .get_novel(novel_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Novel {}", novel_id)))
}

pub async fn create_novel(
    State(state): State<AppState>,
    payload: Result<Json<CreateNovelRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<NovelCreatedResponse>)> {
    let Json(payload) = payload?;
    payload.validate()?;

    let novel = state.store.create_novel(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(NovelCreatedResponse {
            message: "Novel created".to_string(),
            novel,
        }),
    ))
}
