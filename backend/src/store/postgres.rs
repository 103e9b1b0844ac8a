//! Postgres-backed resource store.

use std::collections::BTreeSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::{AsyncPgConnection, RunQueryDsl, SimpleAsyncConnection};
use novel_shared::models::{Chapter, ChapterSummary, ChapterView, Novel, NovelDetail};

use super::{NewChapter, NewNovel, Page, ResourceStore, StoreError, StoreResult};
use crate::db::{DbConnection, DbPool};
use crate::models::{ChapterRow, ChapterViewRow, NewChapterRow, NewNovelRow, NovelRow, TagRow};
use crate::schema::{chapters, novels};

const SCHEMA_SQL: &str = include_str!("../../migrations/schema.sql");

pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> StoreResult<DbConnection> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl ResourceStore for PgStore {
    async fn list_novels(&self, page: Page) -> StoreResult<Vec<Novel>> {
        let mut conn = self.conn().await?;
        let rows = novel_queries::list(&mut conn, page).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_novel(&self, novel_id: i32) -> StoreResult<Option<NovelDetail>> {
        let mut conn = self.conn().await?;
        let Some(novel) = novel_queries::get_by_id(&mut conn, novel_id).await? else {
            return Ok(None);
        };

        let chapters: Vec<Chapter> = chapter_queries::list_for_novel(&mut conn, novel_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(Some(NovelDetail {
            novel: novel.into(),
            chapters: chapters.iter().map(ChapterSummary::from).collect(),
        }))
    }

    async fn create_novel(&self, novel: NewNovel) -> StoreResult<Novel> {
        let mut conn = self.conn().await?;
        let row = novel_queries::create(&mut conn, &novel).await?;
        tracing::info!(novel_id = row.id, "Created novel");
        Ok(row.into())
    }

    async fn list_chapters(&self, novel_id: i32) -> StoreResult<Vec<Chapter>> {
        let mut conn = self.conn().await?;
        let rows = chapter_queries::list_for_novel(&mut conn, novel_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_chapter(&self, novel_id: i32, chapter_id: i32) -> StoreResult<Option<ChapterView>> {
        let mut conn = self.conn().await?;
        let row = chapter_queries::get_view(&mut conn, novel_id, chapter_id).await?;
        Ok(row.map(Into::into))
    }

    async fn create_chapter(&self, chapter: NewChapter) -> StoreResult<Chapter> {
        let mut conn = self.conn().await?;

        if !novel_queries::exists(&mut conn, chapter.novel_id).await? {
            return Err(StoreError::NotFound(format!("Novel {}", chapter.novel_id)));
        }

        let row = match chapter_queries::create(&mut conn, &chapter).await {
            Ok(row) => row,
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                return Err(StoreError::Conflict(format!(
                    "Chapter {} of novel {} already exists",
                    chapter.chapter_number, chapter.novel_id
                )));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            novel_id = row.novel_id,
            chapter_number = row.chapter_number,
            "Created chapter"
        );
        Ok(row.into())
    }

    async fn distinct_tags(&self) -> StoreResult<BTreeSet<String>> {
        let mut conn = self.conn().await?;
        let rows = novel_queries::distinct_tags(&mut conn).await?;
        Ok(rows.into_iter().map(|row| row.tag).collect())
    }

    async fn init_schema(&self) -> StoreResult<()> {
        let mut conn = self.conn().await?;
        apply_schema(&mut conn).await?;
        tracing::info!("Database schema applied");
        Ok(())
    }
}

async fn apply_schema(conn: &mut AsyncPgConnection) -> QueryResult<()> {
    conn.batch_execute(SCHEMA_SQL).await
}

mod novel_queries {
    use super::*;

    pub async fn list(conn: &mut AsyncPgConnection, page: Page) -> QueryResult<Vec<NovelRow>> {
        novels::table
            .order_by((novels::created_at.desc(), novels::id.desc()))
            .limit(page.page_size)
            .offset(page.offset())
            .select(NovelRow::as_select())
            .load(conn)
            .await
    }

    pub async fn get_by_id(
        conn: &mut AsyncPgConnection,
        novel_id: i32,
    ) -> QueryResult<Option<NovelRow>> {
        novels::table
            .find(novel_id)
            .select(NovelRow::as_select())
            .first(conn)
            .await
            .optional()
    }

    pub async fn exists(conn: &mut AsyncPgConnection, novel_id: i32) -> QueryResult<bool> {
        diesel::select(diesel::dsl::exists(novels::table.find(novel_id)))
            .get_result(conn)
            .await
    }

    pub async fn create(conn: &mut AsyncPgConnection, novel: &NewNovel) -> QueryResult<NovelRow> {
        diesel::insert_into(novels::table)
            .values(NewNovelRow::from(novel))
            .returning(NovelRow::as_returning())
            .get_result(conn)
            .await
    }

    pub async fn distinct_tags(conn: &mut AsyncPgConnection) -> QueryResult<Vec<TagRow>> {
        diesel::sql_query("SELECT DISTINCT unnest(tags) AS tag FROM novels ORDER BY tag")
            .load(conn)
            .await
    }
}

mod chapter_queries {
    use super::*;

    pub async fn list_for_novel(
        conn: &mut AsyncPgConnection,
        novel_id: i32,
    ) -> QueryResult<Vec<ChapterRow>> {
        chapters::table
            .filter(chapters::novel_id.eq(novel_id))
            .order_by(chapters::chapter_number.asc())
            .select(ChapterRow::as_select())
            .load(conn)
            .await
    }

    pub async fn get_view(
        conn: &mut AsyncPgConnection,
        novel_id: i32,
        chapter_id: i32,
    ) -> QueryResult<Option<ChapterViewRow>> {
        diesel::sql_query(
            "WITH ordered AS ( \
                SELECT c.id, c.novel_id, c.chapter_number, c.title, c.text, c.created_at, \
                    LAG(c.id) OVER (ORDER BY c.chapter_number) AS prev_chapter, \
                    LEAD(c.id) OVER (ORDER BY c.chapter_number) AS next_chapter \
                FROM chapters c \
                WHERE c.novel_id = $1 \
            ) \
            SELECT o.*, n.title AS novel_title \
            FROM ordered o \
            JOIN novels n ON n.id = o.novel_id \
            WHERE o.id = $2",
        )
        .bind::<diesel::sql_types::Int4, _>(novel_id)
        .bind::<diesel::sql_types::Int4, _>(chapter_id)
        .get_result(conn)
        .await
        .optional()
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        chapter: &NewChapter,
    ) -> QueryResult<ChapterRow> {
        diesel::insert_into(chapters::table)
            .values(NewChapterRow::from(chapter))
            .returning(ChapterRow::as_returning())
            .get_result(conn)
            .await
    }
}
