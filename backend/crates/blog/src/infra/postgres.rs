//! PostgreSQL Repository Implementation
//!
//! Same predicate-compiler shape as the catalog: one `push_filters`
//! feeds both the COUNT and the page query. Create and update run their
//! join-table work inside a single transaction and re-fetch the
//! hydrated post afterwards.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::domain::entity::{Author, BlogCategory, BlogPost, BlogTag, NewPost, PostUpdate, Seo};
use crate::domain::query::{BlogFilter, BlogQuery, BlogSort};
use crate::domain::repository::BlogRepository;
use crate::domain::slug::slugify;
use crate::error::{BlogError, BlogResult};
use kernel::id::{BlogCategoryId, BlogPostId, BlogTagId, UserId};

/// PostgreSQL-backed blog repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Predicate compilation
// ============================================================================

const POST_PAGE_SELECT: &str = r#"
SELECT
    bp.blog_post_id,
    bp.title,
    bp.slug,
    bp.content,
    bp.excerpt,
    bp.cover_image_url,
    bp.published,
    bp.featured,
    bp.created_at,
    bp.updated_at,
    u.user_id AS author_id,
    u.username AS author_username,
    u.avatar_url AS author_avatar_url,
    (SELECT COUNT(*) FROM blog_comments bc WHERE bc.post_id = bp.blog_post_id) AS comment_count,
    (SELECT COUNT(*) FROM blog_likes bl WHERE bl.post_id = bp.blog_post_id) AS like_count
FROM blog_posts bp
JOIN users u ON u.user_id = bp.author_id
WHERE TRUE"#;

const POST_COUNT_SELECT: &str = "SELECT COUNT(*) FROM blog_posts bp WHERE TRUE";

/// Append the clause conjunction to a query that ends in `WHERE TRUE`
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &[BlogFilter]) {
    for clause in filters {
        qb.push(" AND ");
        match clause {
            BlogFilter::Published => {
                qb.push("bp.published = TRUE");
            }
            BlogFilter::Featured(featured) => {
                qb.push("bp.featured = ");
                qb.push_bind(*featured);
            }
            BlogFilter::CategorySlug(slug) => {
                qb.push(
                    "EXISTS (SELECT 1 FROM blog_post_categories bpc \
                     JOIN blog_categories bcat ON bcat.blog_category_id = bpc.category_id \
                     WHERE bpc.post_id = bp.blog_post_id AND bcat.slug = ",
                );
                qb.push_bind(slug.clone());
                qb.push(")");
            }
            BlogFilter::TagSlug(slug) => {
                qb.push(
                    "EXISTS (SELECT 1 FROM blog_post_tags bpt \
                     JOIN blog_tags bt ON bt.blog_tag_id = bpt.tag_id \
                     WHERE bpt.post_id = bp.blog_post_id AND bt.slug = ",
                );
                qb.push_bind(slug.clone());
                qb.push(")");
            }
            BlogFilter::TextSearch(needle) => {
                let pattern = like_pattern(needle);
                qb.push("(bp.title ILIKE ");
                qb.push_bind(pattern.clone());
                qb.push(" OR bp.content ILIKE ");
                qb.push_bind(pattern.clone());
                qb.push(" OR bp.excerpt ILIKE ");
                qb.push_bind(pattern);
                qb.push(")");
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

/// ORDER BY clause for a sort mode; never interpolates client strings
fn order_by(sort: BlogSort) -> &'static str {
    match sort {
        BlogSort::Latest => "bp.created_at DESC",
        BlogSort::Oldest => "bp.created_at ASC",
        BlogSort::Popular => "like_count DESC, bp.created_at DESC",
    }
}

fn count_query(filters: &[BlogFilter]) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new(POST_COUNT_SELECT);
    push_filters(&mut qb, filters);
    qb
}

fn page_query(query: &BlogQuery) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new(POST_PAGE_SELECT);
    push_filters(&mut qb, &query.filters);
    qb.push(format!(" ORDER BY {}", order_by(query.sort)));
    qb.push(" LIMIT ");
    qb.push_bind(query.page.limit() as i64);
    qb.push(" OFFSET ");
    qb.push_bind(query.page.offset());
    qb
}

// ============================================================================
// Repository implementation
// ============================================================================

impl BlogRepository for PgBlogRepository {
    async fn count(&self, filters: &[BlogFilter]) -> BlogResult<i64> {
        let count: i64 = count_query(filters)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn list(&self, query: &BlogQuery) -> BlogResult<Vec<BlogPost>> {
        let rows: Vec<PostRow> = page_query(query)
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        self.hydrate(rows).await
    }

    async fn find_by_id(&self, id: &BlogPostId) -> BlogResult<Option<BlogPost>> {
        let mut qb = QueryBuilder::new(POST_PAGE_SELECT);
        qb.push(" AND bp.blog_post_id = ");
        qb.push_bind(*id.as_uuid());

        let row: Option<PostRow> = qb.build_query_as().fetch_optional(&self.pool).await?;
        let Some(row) = row else {
            return Ok(None);
        };

        Ok(self.hydrate(vec![row]).await?.into_iter().next())
    }

    async fn create(&self, draft: &NewPost) -> BlogResult<BlogPost> {
        let mut tx = self.pool.begin().await?;

        let post_id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO blog_posts (
                blog_post_id, title, slug, content, excerpt, cover_image_url,
                published, featured, author_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(post_id)
        .bind(&draft.title)
        .bind(&draft.slug)
        .bind(&draft.content)
        .bind(&draft.excerpt)
        .bind(&draft.cover_image_url)
        .bind(draft.published)
        .bind(draft.featured)
        .bind(draft.author_id.as_uuid())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        attach_categories(&mut tx, post_id, &draft.categories).await?;
        attach_tags(&mut tx, post_id, &draft.tags).await?;

        if let Some(seo) = &draft.seo {
            upsert_seo(&mut tx, post_id, seo).await?;
        }

        tx.commit().await?;

        self.find_by_id(&BlogPostId::from_uuid(post_id))
            .await?
            .ok_or_else(|| BlogError::Internal("Created post vanished".to_string()))
    }

    async fn update(&self, id: &BlogPostId, changes: &PostUpdate) -> BlogResult<BlogPost> {
        let mut tx = self.pool.begin().await?;
        let post_id = *id.as_uuid();

        let result = sqlx::query(
            r#"
            UPDATE blog_posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                content = COALESCE($4, content),
                excerpt = COALESCE($5, excerpt),
                cover_image_url = COALESCE($6, cover_image_url),
                published = COALESCE($7, published),
                featured = COALESCE($8, featured),
                updated_at = $9
            WHERE blog_post_id = $1
            "#,
        )
        .bind(post_id)
        .bind(&changes.title)
        .bind(&changes.slug)
        .bind(&changes.content)
        .bind(&changes.excerpt)
        .bind(&changes.cover_image_url)
        .bind(changes.published)
        .bind(changes.featured)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(BlogError::PostNotFound);
        }

        // A present list replaces the join set wholesale
        if let Some(categories) = &changes.categories {
            sqlx::query("DELETE FROM blog_post_categories WHERE post_id = $1")
                .bind(post_id)
                .execute(&mut *tx)
                .await?;
            attach_categories(&mut tx, post_id, categories).await?;
        }
        if let Some(tags) = &changes.tags {
            sqlx::query("DELETE FROM blog_post_tags WHERE post_id = $1")
                .bind(post_id)
                .execute(&mut *tx)
                .await?;
            attach_tags(&mut tx, post_id, tags).await?;
        }

        if let Some(seo) = &changes.seo {
            upsert_seo(&mut tx, post_id, seo).await?;
        }

        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| BlogError::Internal("Updated post vanished".to_string()))
    }

    async fn delete(&self, id: &BlogPostId) -> BlogResult<()> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE blog_post_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BlogError::PostNotFound);
        }
        Ok(())
    }

    async fn list_categories(&self) -> BlogResult<Vec<BlogCategory>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT blog_category_id, name, slug FROM blog_categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }
}

// ============================================================================
// Join-table writes (run inside the caller's transaction)
// ============================================================================

fn vocab_select_sql(table: &str, id_column: &str) -> String {
    format!("SELECT {id_column} FROM {table} WHERE name = $1")
}

fn vocab_insert_sql(table: &str, id_column: &str) -> String {
    // Bare ON CONFLICT covers both unique columns: a name clash means a
    // concurrent insert won the race, a slug clash means a different name
    // slugifies to the same value.
    format!(
        "INSERT INTO {table} ({id_column}, name, slug) VALUES ($1, $2, $3) \
         ON CONFLICT DO NOTHING RETURNING {id_column}"
    )
}

/// Find a vocabulary row by name, inserting it if absent
///
/// A no-op insert followed by a missing re-select means the slug belongs
/// to a differently named entry; that is a client error, not a broken
/// transaction.
async fn connect_or_create(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    id_column: &str,
    name: &str,
) -> BlogResult<Uuid> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(BlogError::Validation(format!(
            "\"{name}\" does not produce a usable slug"
        )));
    }

    let existing: Option<Uuid> = sqlx::query_scalar(&vocab_select_sql(table, id_column))
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;
    if let Some(id) = existing {
        return Ok(id);
    }

    let inserted: Option<Uuid> = sqlx::query_scalar(&vocab_insert_sql(table, id_column))
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(&slug)
        .fetch_optional(&mut **tx)
        .await?;
    if let Some(id) = inserted {
        return Ok(id);
    }

    let raced: Option<Uuid> = sqlx::query_scalar(&vocab_select_sql(table, id_column))
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;
    raced.ok_or_else(|| {
        BlogError::Validation(format!(
            "\"{name}\" conflicts with an existing entry sharing the slug \"{slug}\""
        ))
    })
}

/// Connect-or-create categories by name and join them to the post
async fn attach_categories(
    tx: &mut Transaction<'_, Postgres>,
    post_id: Uuid,
    names: &[String],
) -> BlogResult<()> {
    for name in names {
        let category_id =
            connect_or_create(tx, "blog_categories", "blog_category_id", name).await?;

        sqlx::query(
            "INSERT INTO blog_post_categories (post_id, category_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(post_id)
        .bind(category_id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Connect-or-create tags by name and join them to the post
async fn attach_tags(
    tx: &mut Transaction<'_, Postgres>,
    post_id: Uuid,
    names: &[String],
) -> BlogResult<()> {
    for name in names {
        let tag_id = connect_or_create(tx, "blog_tags", "blog_tag_id", name).await?;

        sqlx::query(
            "INSERT INTO blog_post_tags (post_id, tag_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(post_id)
        .bind(tag_id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn upsert_seo(
    tx: &mut Transaction<'_, Postgres>,
    post_id: Uuid,
    seo: &Seo,
) -> BlogResult<()> {
    sqlx::query(
        r#"
        INSERT INTO blog_seo (post_id, meta_title, meta_description, keywords)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (post_id) DO UPDATE SET
            meta_title = EXCLUDED.meta_title,
            meta_description = EXCLUDED.meta_description,
            keywords = EXCLUDED.keywords
        "#,
    )
    .bind(post_id)
    .bind(&seo.meta_title)
    .bind(&seo.meta_description)
    .bind(&seo.keywords)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

// ============================================================================
// Hydration
// ============================================================================

impl PgBlogRepository {
    /// Attach categories, tags and SEO to a fetched page of rows
    async fn hydrate(&self, rows: Vec<PostRow>) -> BlogResult<Vec<BlogPost>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.blog_post_id).collect();
        let mut categories = self.categories_for(&ids).await?;
        let mut tags = self.tags_for(&ids).await?;
        let mut seo = self.seo_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.blog_post_id;
                row.into_post(
                    categories.remove(&id).unwrap_or_default(),
                    tags.remove(&id).unwrap_or_default(),
                    seo.remove(&id),
                )
            })
            .collect())
    }

    async fn categories_for(
        &self,
        ids: &[Uuid],
    ) -> BlogResult<HashMap<Uuid, Vec<BlogCategory>>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, PostCategoryRow>(
            r#"
            SELECT bpc.post_id, bcat.blog_category_id, bcat.name, bcat.slug
            FROM blog_post_categories bpc
            JOIN blog_categories bcat ON bcat.blog_category_id = bpc.category_id
            WHERE bpc.post_id = ANY($1)
            ORDER BY bcat.name
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<BlogCategory>> = HashMap::new();
        for row in rows {
            grouped.entry(row.post_id).or_default().push(BlogCategory {
                id: BlogCategoryId::from_uuid(row.blog_category_id),
                name: row.name,
                slug: row.slug,
            });
        }
        Ok(grouped)
    }

    async fn tags_for(&self, ids: &[Uuid]) -> BlogResult<HashMap<Uuid, Vec<BlogTag>>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, PostTagRow>(
            r#"
            SELECT bpt.post_id, bt.blog_tag_id, bt.name, bt.slug
            FROM blog_post_tags bpt
            JOIN blog_tags bt ON bt.blog_tag_id = bpt.tag_id
            WHERE bpt.post_id = ANY($1)
            ORDER BY bt.name
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<BlogTag>> = HashMap::new();
        for row in rows {
            grouped.entry(row.post_id).or_default().push(BlogTag {
                id: BlogTagId::from_uuid(row.blog_tag_id),
                name: row.name,
                slug: row.slug,
            });
        }
        Ok(grouped)
    }

    async fn seo_for(&self, ids: &[Uuid]) -> BlogResult<HashMap<Uuid, Seo>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, SeoRow>(
            r#"
            SELECT post_id, meta_title, meta_description, keywords
            FROM blog_seo
            WHERE post_id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    row.post_id,
                    Seo {
                        meta_title: row.meta_title,
                        meta_description: row.meta_description,
                        keywords: row.keywords,
                    },
                )
            })
            .collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    blog_post_id: Uuid,
    title: String,
    slug: String,
    content: String,
    excerpt: Option<String>,
    cover_image_url: Option<String>,
    published: bool,
    featured: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_id: Uuid,
    author_username: String,
    author_avatar_url: String,
    comment_count: i64,
    like_count: i64,
}

impl PostRow {
    fn into_post(
        self,
        categories: Vec<BlogCategory>,
        tags: Vec<BlogTag>,
        seo: Option<Seo>,
    ) -> BlogPost {
        BlogPost {
            id: BlogPostId::from_uuid(self.blog_post_id),
            title: self.title,
            slug: self.slug,
            content: self.content,
            excerpt: self.excerpt,
            cover_image_url: self.cover_image_url,
            published: self.published,
            featured: self.featured,
            author: Author {
                id: UserId::from_uuid(self.author_id),
                username: self.author_username,
                avatar_url: self.author_avatar_url,
            },
            categories,
            tags,
            comment_count: self.comment_count,
            like_count: self.like_count,
            seo,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    blog_category_id: Uuid,
    name: String,
    slug: String,
}

impl CategoryRow {
    fn into_category(self) -> BlogCategory {
        BlogCategory {
            id: BlogCategoryId::from_uuid(self.blog_category_id),
            name: self.name,
            slug: self.slug,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostCategoryRow {
    post_id: Uuid,
    blog_category_id: Uuid,
    name: String,
    slug: String,
}

#[derive(sqlx::FromRow)]
struct PostTagRow {
    post_id: Uuid,
    blog_tag_id: Uuid,
    name: String,
    slug: String,
}

#[derive(sqlx::FromRow)]
struct SeoRow {
    post_id: Uuid,
    meta_title: Option<String>,
    meta_description: Option<String>,
    keywords: Option<String>,
}

// ============================================================================
// SQL generation tests (no database required)
// ============================================================================
