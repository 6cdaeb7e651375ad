//! Blog Listing Query Model
//!
//! Same tagged-union shape as the catalog's discovery query: the listing
//! predicate is a conjunction of independently-optional clauses, and the
//! same clause list feeds both the COUNT and the page query.
//!
//! The public listing always includes `Published`, pushed by the query
//! constructor rather than hidden in SQL, so the invariant is visible in
//! the clause list itself.

use crate::error::BlogResult;
use kernel::page::PageRequest;

/// Blog sort modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlogSort {
    /// Newest first (default)
    #[default]
    Latest,
    /// Oldest first
    Oldest,
    /// Most liked first
    Popular,
}

impl BlogSort {
    /// Parse leniently: unknown values fall back to `latest`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.to_lowercase()).as_deref() {
            Some("oldest") => BlogSort::Oldest,
            Some("popular") => BlogSort::Popular,
            _ => BlogSort::Latest,
        }
    }
}

/// One predicate clause over the post listing
#[derive(Debug, Clone, PartialEq)]
pub enum BlogFilter {
    /// `published = true` — always present in the public listing
    Published,
    /// `featured = ?`
    Featured(bool),
    /// Any category join row with this slug
    CategorySlug(String),
    /// Any tag join row with this slug
    TagSlug(String),
    /// Case-insensitive substring over title, content and excerpt
    TextSearch(String),
}

/// Raw query-string values as they arrive from the client
#[derive(Debug, Clone, Default)]
pub struct RawBlogFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<bool>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// A validated blog listing query
#[derive(Debug, Clone)]
pub struct BlogQuery {
    pub filters: Vec<BlogFilter>,
    pub sort: BlogSort,
    pub page: PageRequest,
}

impl BlogQuery {
    /// Validate and normalize; only non-positive page/limit are rejected
    pub fn from_raw(raw: RawBlogFilter) -> BlogResult<Self> {
        let page = PageRequest::from_raw(raw.page, raw.limit)?;
        let sort = BlogSort::parse(raw.sort.as_deref());

        let mut filters = vec![BlogFilter::Published];

        if let Some(featured) = raw.featured {
            filters.push(BlogFilter::Featured(featured));
        }
        if let Some(slug) = normalized(raw.category) {
            filters.push(BlogFilter::CategorySlug(slug));
        }
        if let Some(slug) = normalized(raw.tag) {
            filters.push(BlogFilter::TagSlug(slug));
        }
        if let Some(needle) = normalized(raw.search) {
            filters.push(BlogFilter::TextSearch(needle));
        }

        Ok(Self {
            filters,
            sort,
            page,
        })
    }
}

fn normalized(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_published_is_always_present() {
        let query = BlogQuery::from_raw(RawBlogFilter::default()).unwrap();
        assert_eq!(query.filters, vec![BlogFilter::Published]);
        assert_eq!(query.sort, BlogSort::Latest);
    }

    #[test]
    fn test_all_filters() {
        let raw = RawBlogFilter {
            search: Some("axum".to_string()),
            category: Some("tutorials".to_string()),
            tag: Some("rust".to_string()),
            featured: Some(true),
            sort: Some("popular".to_string()),
            ..Default::default()
        };
        let query = BlogQuery::from_raw(raw).unwrap();

        assert_eq!(query.sort, BlogSort::Popular);
        assert_eq!(query.filters.len(), 5);
        assert!(query.filters.contains(&BlogFilter::Featured(true)));
        assert!(query
            .filters
            .contains(&BlogFilter::CategorySlug("tutorials".to_string())));
        assert!(query.filters.contains(&BlogFilter::TagSlug("rust".to_string())));
        assert!(query
            .filters
            .contains(&BlogFilter::TextSearch("axum".to_string())));
    }

    #[test]
    fn test_blank_values_impose_no_constraint() {
        let raw = RawBlogFilter {
            search: Some("   ".to_string()),
            category: Some(String::new()),
            ..Default::default()
        };
        let query = BlogQuery::from_raw(raw).unwrap();
        assert_eq!(query.filters, vec![BlogFilter::Published]);
    }

    #[test]
    fn test_unknown_sort_defaults_to_latest() {
        assert_eq!(BlogSort::parse(Some("spicy")), BlogSort::Latest);
        assert_eq!(BlogSort::parse(Some("OLDEST")), BlogSort::Oldest);
        assert_eq!(BlogSort::parse(None), BlogSort::Latest);
    }

    #[test]
    fn test_bad_pagination_is_rejected() {
        let raw = RawBlogFilter {
            page: Some(0),
            ..Default::default()
        };
        assert!(BlogQuery::from_raw(raw).is_err());
    }
}
