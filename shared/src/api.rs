use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Chapter, Novel};

// ============================================================================
// Auth API Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthSuccessResponse {
    pub message: String,
    /// The login-widget payload exactly as received, `hash` included
    pub user: serde_json::Map<String, serde_json::Value>,
}

// ============================================================================
// Novel API Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNovelRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    #[validate(length(max = 10000))]
    pub description: String,

    pub tags: Vec<String>,

    #[validate(range(min = 0))]
    pub total_chapters: i32,

    #[validate(length(max = 200))]
    pub author: String,

    pub year_started: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNovelsQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NovelCreatedResponse {
    pub message: String,
    pub novel: Novel,
}

// ============================================================================
// Chapter API Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChapterRequest {
    pub novel_id: i32,

    #[validate(range(min = 1))]
    pub chapter_number: i32,

    #[validate(length(max = 500))]
    pub title: String,

    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ListChaptersQuery {
    pub novel_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChapterCreatedResponse {
    pub message: String,
    pub chapter: Chapter,
}

// ============================================================================
// Common Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}
