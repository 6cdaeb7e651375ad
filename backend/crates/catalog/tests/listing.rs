//! Listing behavior over an in-memory fake repository: envelope math,
//! any-of filter semantics, and rejection ordering.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use catalog::application::{GetContentUseCase, ListContentUseCase};
use catalog::domain::entity::{Author, Chapter, Content, ContentDetail, Genre, Tag};
use catalog::domain::query::{
    ContentQuery, ContentStatus, ContentType, FilterClause, RawContentFilter,
};
use catalog::domain::repository::ContentRepository;
use catalog::error::{CatalogError, CatalogResult};
use kernel::id::{ChapterId, ContentId, GenreId, TagId, UserId};

// ============================================================================
// Fake repository
// ============================================================================

#[derive(Clone, Default)]
struct InMemoryCatalog {
    items: Arc<Mutex<Vec<Content>>>,
    queries_run: Arc<AtomicUsize>,
}

impl InMemoryCatalog {
    fn insert(&self, content: Content) {
        self.items.lock().unwrap().push(content);
    }

    fn matches(content: &Content, clause: &FilterClause) -> bool {
        match clause {
            FilterClause::TypeEquals(ty) => content.content_type == *ty,
            FilterClause::StatusEquals(status) => content.status == *status,
            FilterClause::TextSearch(needle) => {
                let needle = needle.to_lowercase();
                content.title.to_lowercase().contains(&needle)
                    || content.description.to_lowercase().contains(&needle)
            }
            FilterClause::AnyGenre(ids) => content
                .genres
                .iter()
                .any(|g| ids.contains(g.id.as_uuid())),
            FilterClause::AnyTag(ids) => {
                content.tags.iter().any(|t| ids.contains(t.id.as_uuid()))
            }
        }
    }

    fn filtered(&self, filters: &[FilterClause]) -> Vec<Content> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .filter(|c| filters.iter().all(|f| Self::matches(c, f)))
            .cloned()
            .collect()
    }
}

impl ContentRepository for InMemoryCatalog {
    async fn count(&self, filters: &[FilterClause]) -> CatalogResult<i64> {
        self.queries_run.fetch_add(1, Ordering::SeqCst);
        Ok(self.filtered(filters).len() as i64)
    }

    async fn list(&self, query: &ContentQuery) -> CatalogResult<Vec<Content>> {
        self.queries_run.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .filtered(&query.filters)
            .into_iter()
            .skip(query.page.offset() as usize)
            .take(query.page.limit() as usize)
            .collect())
    }

    async fn list_all(&self, query: &ContentQuery) -> CatalogResult<Vec<Content>> {
        self.queries_run.fetch_add(1, Ordering::SeqCst);
        Ok(self.filtered(&query.filters))
    }

    async fn find_by_id(&self, id: &ContentId) -> CatalogResult<Option<ContentDetail>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .map(|content| ContentDetail {
                chapters: vec![Chapter {
                    id: ChapterId::new(),
                    content_id: content.id,
                    chapter_number: 1,
                    title: "Chapter 1".to_string(),
                    created_at: Utc::now(),
                }],
                content,
            }))
    }

    async fn list_genres(&self) -> CatalogResult<Vec<Genre>> {
        Ok(Vec::new())
    }

    async fn list_tags(&self) -> CatalogResult<Vec<Tag>> {
        Ok(Vec::new())
    }
}

fn content(title: &str, ty: ContentType, genres: Vec<Uuid>) -> Content {
    let now = Utc::now();
    Content {
        id: ContentId::new(),
        title: title.to_string(),
        description: format!("{title} description"),
        content_type: ty,
        status: ContentStatus::Ongoing,
        author: Author {
            id: UserId::new(),
            username: "writer".to_string(),
            avatar_url: "https://api.dicebear.com/7.x/avataaars/svg?seed=writer".to_string(),
        },
        rating: 4.0,
        views: 100,
        cover_image_url: None,
        created_at: now,
        updated_at: now,
        genres: genres
            .into_iter()
            .map(|id| Genre {
                id: GenreId::from_uuid(id),
                name: "genre".to_string(),
                description: None,
            })
            .collect(),
        tags: vec![Tag {
            id: TagId::new(),
            name: "tag".to_string(),
        }],
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn envelope_is_consistent_with_total() {
    let repo = Arc::new(InMemoryCatalog::default());
    for i in 0..23 {
        repo.insert(content(&format!("Novel {i}"), ContentType::Novel, vec![]));
    }

    let raw = RawContentFilter {
        page: Some(2),
        limit: Some(10),
        ..Default::default()
    };
    let page = ListContentUseCase::new(repo)
        .execute(ContentQuery::from_raw(raw).unwrap())
        .await
        .unwrap();

    assert_eq!(page.pagination.total, 23);
    assert_eq!(page.pagination.pages, 3); // ceil(23/10)
    assert_eq!(page.pagination.current_page, 2);
    assert_eq!(page.items.len(), 10);
}

#[tokio::test]
async fn out_of_range_page_returns_empty_not_error() {
    let repo = Arc::new(InMemoryCatalog::default());
    repo.insert(content("Only one", ContentType::Novel, vec![]));

    let raw = RawContentFilter {
        page: Some(50),
        ..Default::default()
    };
    let page = ListContentUseCase::new(repo)
        .execute(ContentQuery::from_raw(raw).unwrap())
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.pagination.current_page, 50);
}

#[tokio::test]
async fn genre_filter_is_any_of() {
    let genre_a = Uuid::new_v4();
    let genre_b = Uuid::new_v4();

    let repo = Arc::new(InMemoryCatalog::default());
    // Tagged with A only; must still match a filter asking for [A, B]
    repo.insert(content("Has A", ContentType::Novel, vec![genre_a]));
    repo.insert(content("Has neither", ContentType::Novel, vec![]));

    let raw = RawContentFilter {
        genres: vec![genre_a, genre_b],
        ..Default::default()
    };
    let page = ListContentUseCase::new(repo)
        .execute(ContentQuery::from_raw(raw).unwrap())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Has A");
}

#[tokio::test]
async fn invalid_sort_rejects_before_any_query() {
    let repo = Arc::new(InMemoryCatalog::default());

    let raw = RawContentFilter {
        sort_by: Some("not_a_field".to_string()),
        ..Default::default()
    };
    let err = ContentQuery::from_raw(raw).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidSortField(_)));

    // Validation failed before the repository was ever touched
    assert_eq!(repo.queries_run.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn novels_route_hides_non_novels() {
    let repo = Arc::new(InMemoryCatalog::default());
    let manga = content("A manga", ContentType::Manga, vec![]);
    let manga_id = manga.id;
    repo.insert(manga);

    // Visible through the generic detail path
    GetContentUseCase::new(repo.clone())
        .execute(&manga_id, None)
        .await
        .unwrap();

    // 404 through the type-pinned path
    let err = GetContentUseCase::new(repo)
        .execute(&manga_id, Some(ContentType::Novel))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::ContentNotFound));
}

#[tokio::test]
async fn type_pin_overrides_client_payload() {
    let repo = Arc::new(InMemoryCatalog::default());
    repo.insert(content("A manga", ContentType::Manga, vec![]));
    repo.insert(content("A novel", ContentType::Novel, vec![]));

    // Client asked for manga, but the novels route pins the type
    let raw = RawContentFilter {
        content_type: Some("MANGA".to_string()),
        ..Default::default()
    };
    let query = ContentQuery::from_raw(raw).unwrap().pin_type(ContentType::Novel);

    let page = ListContentUseCase::new(repo).execute(query).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "A novel");
}
