//! PostgreSQL Repository Implementations
//!
//! The predicate compiler (`push_filters`) is shared by the COUNT query
//! and the page query, so `total` can never disagree with page contents.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{Author, Chapter, Content, ContentDetail, Genre, Tag};
use crate::domain::query::{ContentQuery, ContentStatus, ContentType, FilterClause};
use crate::domain::repository::ContentRepository;
use crate::error::{CatalogError, CatalogResult};
use kernel::id::{ChapterId, ContentId, GenreId, TagId, UserId};

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Predicate compilation
// ============================================================================

const CONTENT_PAGE_SELECT: &str = r#"
SELECT
    c.content_id,
    c.title,
    c.description,
    c.content_type,
    c.status,
    c.rating,
    c.views,
    c.cover_image_url,
    c.created_at,
    c.updated_at,
    u.user_id AS author_id,
    u.username AS author_username,
    u.avatar_url AS author_avatar_url
FROM content c
JOIN users u ON u.user_id = c.author_id
WHERE TRUE"#;

const CONTENT_COUNT_SELECT: &str = "SELECT COUNT(*) FROM content c WHERE TRUE";

/// Append the clause conjunction to a query that ends in `WHERE TRUE`
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &[FilterClause]) {
    for clause in filters {
        qb.push(" AND ");
        match clause {
            FilterClause::TypeEquals(ty) => {
                qb.push("c.content_type = ");
                qb.push_bind(ty.id());
            }
            FilterClause::StatusEquals(status) => {
                qb.push("c.status = ");
                qb.push_bind(status.id());
            }
            FilterClause::TextSearch(needle) => {
                let pattern = like_pattern(needle);
                qb.push("(c.title ILIKE ");
                qb.push_bind(pattern.clone());
                qb.push(" OR c.description ILIKE ");
                qb.push_bind(pattern);
                qb.push(")");
            }
            FilterClause::AnyGenre(ids) => {
                qb.push(
                    "EXISTS (SELECT 1 FROM content_genres cg \
                     WHERE cg.content_id = c.content_id AND cg.genre_id = ANY(",
                );
                qb.push_bind(ids.clone());
                qb.push("))");
            }
            FilterClause::AnyTag(ids) => {
                qb.push(
                    "EXISTS (SELECT 1 FROM content_tags ct \
                     WHERE ct.content_id = c.content_id AND ct.tag_id = ANY(",
                );
                qb.push_bind(ids.clone());
                qb.push("))");
            }
        }
    }
}

/// Substring containment with LIKE metacharacters neutralized
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn count_query(filters: &[FilterClause]) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new(CONTENT_COUNT_SELECT);
    push_filters(&mut qb, filters);
    qb
}

fn page_query(query: &ContentQuery) -> QueryBuilder<'_, Postgres> {
    let mut qb = sorted_query(query);
    qb.push(" LIMIT ");
    qb.push_bind(query.page.limit() as i64);
    qb.push(" OFFSET ");
    qb.push_bind(query.page.offset());
    qb
}

fn sorted_query(query: &ContentQuery) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new(CONTENT_PAGE_SELECT);
    push_filters(&mut qb, &query.filters);

    // Sort column and direction come from whitelisted enums, never from
    // client strings
    qb.push(format!(
        " ORDER BY {} {}",
        query.sort.column(),
        query.order.sql()
    ));
    qb
}

// ============================================================================
// Repository implementation
// ============================================================================

impl ContentRepository for PgCatalogRepository {
    async fn count(&self, filters: &[FilterClause]) -> CatalogResult<i64> {
        let count: i64 = count_query(filters)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn list(&self, query: &ContentQuery) -> CatalogResult<Vec<Content>> {
        let rows: Vec<ContentRow> = page_query(query)
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        self.hydrate(rows).await
    }

    async fn list_all(&self, query: &ContentQuery) -> CatalogResult<Vec<Content>> {
        let rows: Vec<ContentRow> = sorted_query(query)
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        self.hydrate(rows).await
    }

    async fn find_by_id(&self, id: &ContentId) -> CatalogResult<Option<ContentDetail>> {
        let mut qb = QueryBuilder::new(CONTENT_PAGE_SELECT);
        qb.push(" AND c.content_id = ");
        qb.push_bind(*id.as_uuid());

        let row: Option<ContentRow> = qb.build_query_as().fetch_optional(&self.pool).await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let ids = vec![row.content_id];
        let mut genres = self.genres_for(&ids).await?;
        let mut tags = self.tags_for(&ids).await?;

        let content = row.into_content(
            genres.remove(&ids[0]).unwrap_or_default(),
            tags.remove(&ids[0]).unwrap_or_default(),
        )?;

        let chapters = sqlx::query_as::<_, ChapterRow>(
            r#"
            SELECT chapter_id, content_id, chapter_number, title, created_at
            FROM chapters
            WHERE content_id = $1
            ORDER BY chapter_number
            "#,
        )
        .bind(ids[0])
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(ChapterRow::into_chapter)
        .collect();

        Ok(Some(ContentDetail { content, chapters }))
    }

    async fn list_genres(&self) -> CatalogResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, GenreRow>(
            "SELECT genre_id, name, description FROM genres ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GenreRow::into_genre).collect())
    }

    async fn list_tags(&self) -> CatalogResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagRow>("SELECT tag_id, name FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(TagRow::into_tag).collect())
    }
}

impl PgCatalogRepository {
    /// Attach genres and tags to a fetched page of rows
    async fn hydrate(&self, rows: Vec<ContentRow>) -> CatalogResult<Vec<Content>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.content_id).collect();
        let mut genres = self.genres_for(&ids).await?;
        let mut tags = self.tags_for(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let genres = genres.remove(&row.content_id).unwrap_or_default();
                let tags = tags.remove(&row.content_id).unwrap_or_default();
                row.into_content(genres, tags)
            })
            .collect()
    }

    /// Genres for a set of content ids, grouped in memory
    async fn genres_for(&self, ids: &[Uuid]) -> CatalogResult<HashMap<Uuid, Vec<Genre>>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, ContentGenreRow>(
            r#"
            SELECT cg.content_id, g.genre_id, g.name, g.description
            FROM content_genres cg
            JOIN genres g ON g.genre_id = cg.genre_id
            WHERE cg.content_id = ANY($1)
            ORDER BY g.name
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Genre>> = HashMap::new();
        for row in rows {
            grouped.entry(row.content_id).or_default().push(Genre {
                id: GenreId::from_uuid(row.genre_id),
                name: row.name,
                description: row.description,
            });
        }
        Ok(grouped)
    }

    /// Tags for a set of content ids, grouped in memory
    async fn tags_for(&self, ids: &[Uuid]) -> CatalogResult<HashMap<Uuid, Vec<Tag>>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, ContentTagRow>(
            r#"
            SELECT ct.content_id, t.tag_id, t.name
            FROM content_tags ct
            JOIN tags t ON t.tag_id = ct.tag_id
            WHERE ct.content_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for row in rows {
            grouped.entry(row.content_id).or_default().push(Tag {
                id: TagId::from_uuid(row.tag_id),
                name: row.name,
            });
        }
        Ok(grouped)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ContentRow {
    content_id: Uuid,
    title: String,
    description: String,
    content_type: i16,
    status: i16,
    rating: f32,
    views: i64,
    cover_image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_id: Uuid,
    author_username: String,
    author_avatar_url: String,
}

impl ContentRow {
    fn into_content(self, genres: Vec<Genre>, tags: Vec<Tag>) -> CatalogResult<Content> {
        let content_type = ContentType::from_id(self.content_type).ok_or_else(|| {
            CatalogError::Internal(format!("Invalid content_type: {}", self.content_type))
        })?;
        let status = ContentStatus::from_id(self.status)
            .ok_or_else(|| CatalogError::Internal(format!("Invalid status: {}", self.status)))?;

        Ok(Content {
            id: ContentId::from_uuid(self.content_id),
            title: self.title,
            description: self.description,
            content_type,
            status,
            author: Author {
                id: UserId::from_uuid(self.author_id),
                username: self.author_username,
                avatar_url: self.author_avatar_url,
            },
            rating: self.rating,
            views: self.views,
            cover_image_url: self.cover_image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
            genres,
            tags,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ChapterRow {
    chapter_id: Uuid,
    content_id: Uuid,
    chapter_number: i32,
    title: String,
    created_at: DateTime<Utc>,
}

impl ChapterRow {
    fn into_chapter(self) -> Chapter {
        Chapter {
            id: ChapterId::from_uuid(self.chapter_id),
            content_id: ContentId::from_uuid(self.content_id),
            chapter_number: self.chapter_number,
            title: self.title,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GenreRow {
    genre_id: Uuid,
    name: String,
    description: Option<String>,
}

impl GenreRow {
    fn into_genre(self) -> Genre {
        Genre {
            id: GenreId::from_uuid(self.genre_id),
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TagRow {
    tag_id: Uuid,
    name: String,
}

impl TagRow {
    fn into_tag(self) -> Tag {
        Tag {
            id: TagId::from_uuid(self.tag_id),
            name: self.name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ContentGenreRow {
    content_id: Uuid,
    genre_id: Uuid,
    name: String,
    description: Option<String>,
}

#[derive(sqlx::FromRow)]
struct ContentTagRow {
    content_id: Uuid,
    tag_id: Uuid,
    name: String,
}

// ============================================================================
// SQL generation tests (no database required)
// ============================================================================
