//! Resource store abstraction for novels, chapters and the tag index.
//!
//! Handlers only see `Arc<dyn ResourceStore>`; `PgStore` is the production
//! implementation and `MemoryStore` backs tests and database-less runs.

use std::collections::BTreeSet;

use async_trait::async_trait;
use diesel_async::pooled_connection::deadpool::PoolError;
use novel_shared::api::{CreateChapterRequest, CreateNovelRequest};
use novel_shared::models::{Chapter, ChapterView, Novel, NovelDetail};
use thiserror::Error;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Largest page a single list request may ask for.
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database connection error")]
    ConnectionPool(#[from] PoolError),

    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Input for creating a new novel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNovel {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub total_chapters: i32,
    pub author: String,
    pub year_started: i32,
}

impl From<CreateNovelRequest> for NewNovel {
    fn from(req: CreateNovelRequest) -> Self {
        NewNovel {
            title: req.title,
            description: req.description,
            tags: req.tags,
            total_chapters: req.total_chapters,
            author: req.author,
            year_started: req.year_started,
        }
    }
}

/// Input for creating a new chapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChapter {
    pub novel_id: i32,
    pub chapter_number: i32,
    pub title: String,
    pub text: String,
}

impl From<CreateChapterRequest> for NewChapter {
    fn from(req: CreateChapterRequest) -> Self {
        NewChapter {
            novel_id: req.novel_id,
            chapter_number: req.chapter_number,
            title: req.title,
            text: req.text,
        }
    }
}

/// Page of a newest-first listing. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub page_size: i64,
}

impl Page {
    /// Rows skipped before this page, or `None` if that does not fit in an `i64`.
    pub fn checked_offset(&self) -> Option<i64> {
        self.page.checked_sub(1)?.checked_mul(self.page_size)
    }

    /// Saturates at `i64::MAX`; callers validate with `checked_offset` first.
    pub fn offset(&self) -> i64 {
        self.checked_offset().unwrap_or(i64::MAX)
    }
}

impl Default for Page {
    fn default() -> Self {
        Page {
            page: 1,
            page_size: 10,
        }
    }
}

#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Novels ordered by creation time, newest first.
    async fn list_novels(&self, page: Page) -> StoreResult<Vec<Novel>>;

    /// A novel with its chapters ordered by chapter number.
    async fn get_novel(&self, novel_id: i32) -> StoreResult<Option<NovelDetail>>;

    async fn create_novel(&self, novel: NewNovel) -> StoreResult<Novel>;

    /// Chapters of a novel ordered by chapter number.
    async fn list_chapters(&self, novel_id: i32) -> StoreResult<Vec<Chapter>>;

    /// One chapter of a novel with the ids of the chapters before and after it.
    async fn get_chapter(&self, novel_id: i32, chapter_id: i32) -> StoreResult<Option<ChapterView>>;

    /// Fails with `StoreError::NotFound` when the novel does not exist and
    /// `StoreError::Conflict` when the chapter number is already taken.
    async fn create_chapter(&self, chapter: NewChapter) -> StoreResult<Chapter>;

    /// Every tag used by at least one novel, sorted.
    async fn distinct_tags(&self) -> StoreResult<BTreeSet<String>>;

    /// Create tables and indexes if they do not exist yet.
    async fn init_schema(&self) -> StoreResult<()>;
}
