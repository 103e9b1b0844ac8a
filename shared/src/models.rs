use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Novel as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Novel {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub total_chapters: i32,
    pub author: String,
    pub year_started: i32,
    pub created_at: DateTime<Utc>,
}

/// Chapter of a novel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: i32,
    pub novel_id: i32,
    pub chapter_number: i32,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Chapter entry in a novel's table of contents (no body text)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub id: i32,
    pub chapter_number: i32,
    pub title: String,
}

impl From<&Chapter> for ChapterSummary {
    fn from(chapter: &Chapter) -> Self {
        ChapterSummary {
            id: chapter.id,
            chapter_number: chapter.chapter_number,
            title: chapter.title.clone(),
        }
    }
}

/// Novel together with its table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NovelDetail {
    #[serde(flatten)]
    pub novel: Novel,
    pub chapters: Vec<ChapterSummary>,
}

/// A single chapter as shown in the reader, with links to its neighbours
/// in chapter-number order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterView {
    #[serde(flatten)]
    pub chapter: Chapter,
    pub novel_title: String,
    pub prev_chapter: Option<i32>,
    pub next_chapter: Option<i32>,
}
