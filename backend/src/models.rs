// Database models for Diesel
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use novel_shared::models::{Chapter, ChapterView, Novel};

use crate::store::{NewChapter, NewNovel};

/// Database representation of novels
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::novels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NovelRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub total_chapters: i32,
    pub author: String,
    pub year_started: i32,
    pub created_at: DateTime<Utc>,
}

impl From<NovelRow> for Novel {
    fn from(row: NovelRow) -> Self {
        Novel {
            id: row.id,
            title: row.title,
            description: row.description,
            tags: row.tags,
            total_chapters: row.total_chapters,
            author: row.author,
            year_started: row.year_started,
            created_at: row.created_at,
        }
    }
}

/// Database representation of chapters
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::chapters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChapterRow {
    pub id: i32,
    pub novel_id: i32,
    pub chapter_number: i32,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChapterRow> for Chapter {
    fn from(row: ChapterRow) -> Self {
        Chapter {
            id: row.id,
            novel_id: row.novel_id,
            chapter_number: row.chapter_number,
            title: row.title,
            text: row.text,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for new novels
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::novels)]
pub struct NewNovelRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub tags: &'a [String],
    pub total_chapters: i32,
    pub author: &'a str,
    pub year_started: i32,
}

impl<'a> From<&'a NewNovel> for NewNovelRow<'a> {
    fn from(novel: &'a NewNovel) -> Self {
        NewNovelRow {
            title: &novel.title,
            description: &novel.description,
            tags: &novel.tags,
            total_chapters: novel.total_chapters,
            author: &novel.author,
            year_started: novel.year_started,
        }
    }
}

/// Insertable struct for new chapters
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::chapters)]
pub struct NewChapterRow<'a> {
    pub novel_id: i32,
    pub chapter_number: i32,
    pub title: &'a str,
    pub text: &'a str,
}

impl<'a> From<&'a NewChapter> for NewChapterRow<'a> {
    fn from(chapter: &'a NewChapter) -> Self {
        NewChapterRow {
            novel_id: chapter.novel_id,
            chapter_number: chapter.chapter_number,
            title: &chapter.title,
            text: &chapter.text,
        }
    }
}

/// Row of `SELECT DISTINCT unnest(tags) AS tag`
#[derive(Debug, QueryableByName)]
pub struct TagRow {
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub tag: String,
}

/// Chapter joined with its novel's title and its neighbours by chapter number
#[derive(Debug, QueryableByName)]
pub struct ChapterViewRow {
    #[diesel(sql_type = diesel::sql_types::Int4)]
    pub id: i32,
    #[diesel(sql_type = diesel::sql_types::Int4)]
    pub novel_id: i32,
    #[diesel(sql_type = diesel::sql_types::Int4)]
    pub chapter_number: i32,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub title: String,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub text: String,
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub novel_title: String,
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Int4>)]
    pub prev_chapter: Option<i32>,
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Int4>)]
    pub next_chapter: Option<i32>,
}

impl From<ChapterViewRow> for ChapterView {
    fn from(row: ChapterViewRow) -> Self {
        ChapterView {
            chapter: Chapter {
                id: row.id,
                novel_id: row.novel_id,
                chapter_number: row.chapter_number,
                title: row.title,
                text: row.text,
                created_at: row.created_at,
            },
            novel_title: row.novel_title,
            prev_chapter: row.prev_chapter,
            next_chapter: row.next_chapter,
        }
    }
}
