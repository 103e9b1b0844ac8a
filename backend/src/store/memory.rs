//! In-memory resource store.
//!
//! Keeps everything in process memory behind a single `RwLock`. Used by the
//! handler tests and when the service runs without `DATABASE_URL`.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use novel_shared::models::{Chapter, ChapterSummary, ChapterView, Novel, NovelDetail};
use tokio::sync::RwLock;

use super::{NewChapter, NewNovel, Page, ResourceStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Inner {
    novels: Vec<Novel>,
    chapters: Vec<Chapter>,
    next_novel_id: i32,
    next_chapter_id: i32,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn chapters_of(chapters: &[Chapter], novel_id: i32) -> Vec<Chapter> {
    let mut found: Vec<Chapter> = chapters
        .iter()
        .filter(|c| c.novel_id == novel_id)
        .cloned()
        .collect();
    found.sort_by_key(|c| c.chapter_number);
    found
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn list_novels(&self, page: Page) -> StoreResult<Vec<Novel>> {
        let inner = self.inner.read().await;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.page_size).unwrap_or(0);

        // Insertion order is creation order
        Ok(inner
            .novels
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_novel(&self, novel_id: i32) -> StoreResult<Option<NovelDetail>> {
        let inner = self.inner.read().await;
        let Some(novel) = inner.novels.iter().find(|n| n.id == novel_id) else {
            return Ok(None);
        };

        Ok(Some(NovelDetail {
            novel: novel.clone(),
            chapters: chapters_of(&inner.chapters, novel_id)
                .iter()
                .map(ChapterSummary::from)
                .collect(),
        }))
    }

    async fn create_novel(&self, novel: NewNovel) -> StoreResult<Novel> {
        let mut inner = self.inner.write().await;
        inner.next_novel_id += 1;

        let created = Novel {
            id: inner.next_novel_id,
            title: novel.title,
            description: novel.description,
            tags: novel.tags,
            total_chapters: novel.total_chapters,
            author: novel.author,
            year_started: novel.year_started,
            created_at: Utc::now(),
        };
        inner.novels.push(created.clone());

        Ok(created)
    }

    async fn list_chapters(&self, novel_id: i32) -> StoreResult<Vec<Chapter>> {
        let inner = self.inner.read().await;
        Ok(chapters_of(&inner.chapters, novel_id))
    }

    async fn get_chapter(&self, novel_id: i32, chapter_id: i32) -> StoreResult<Option<ChapterView>> {
        let inner = self.inner.read().await;
        let Some(novel) = inner.novels.iter().find(|n| n.id == novel_id) else {
            return Ok(None);
        };

        let ordered = chapters_of(&inner.chapters, novel_id);
        let Some(position) = ordered.iter().position(|c| c.id == chapter_id) else {
            return Ok(None);
        };

        let prev_chapter = position
            .checked_sub(1)
            .and_then(|i| ordered.get(i))
            .map(|c| c.id);
        let next_chapter = ordered.get(position + 1).map(|c| c.id);

        Ok(Some(ChapterView {
            chapter: ordered[position].clone(),
            novel_title: novel.title.clone(),
            prev_chapter,
            next_chapter,
        }))
    }

    async fn create_chapter(&self, chapter: NewChapter) -> StoreResult<Chapter> {
        let mut inner = self.inner.write().await;

        if !inner.novels.iter().any(|n| n.id == chapter.novel_id) {
            return Err(StoreError::NotFound(format!("Novel {}", chapter.novel_id)));
        }
        if inner
            .chapters
            .iter()
            .any(|c| c.novel_id == chapter.novel_id && c.chapter_number == chapter.chapter_number)
        {
            return Err(StoreError::Conflict(format!(
                "Chapter {} of novel {} already exists",
                chapter.chapter_number, chapter.novel_id
            )));
        }

        inner.next_chapter_id += 1;
        let created = Chapter {
            id: inner.next_chapter_id,
            novel_id: chapter.novel_id,
            chapter_number: chapter.chapter_number,
            title: chapter.title,
            text: chapter.text,
            created_at: Utc::now(),
        };
        inner.chapters.push(created.clone());

        Ok(created)
    }

    async fn distinct_tags(&self) -> StoreResult<BTreeSet<String>> {
        let inner = self.inner.read().await;
        Ok(inner
            .novels
            .iter()
            .flat_map(|n| n.tags.iter().cloned())
            .collect())
    }

    async fn init_schema(&self) -> StoreResult<()> {
        Ok(())
    }
}
