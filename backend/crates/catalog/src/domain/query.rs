//! Discovery Query Model
//!
//! 一覧取得のフィルタを**明示的なタグ付きユニオン**で表現する。
//! 任意のフィールドがクエリに到達することはない:
//! - ソートキーはホワイトリスト照合（違反のみ 400 で拒否）
//! - その他のフィールドは欠落時デフォルト（拒否しない）
//! - 述語は独立な句の AND 結合。欠けた句は制約なし
//!
//! COUNT クエリとページクエリは同じ `Vec<FilterClause>` から生成される
//! ため、total とページ内容が食い違うことはない。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use kernel::page::PageRequest;

// ============================================================================
// Enumerations
// ============================================================================

/// Content type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i16)]
pub enum ContentType {
    Novel = 0,
    Manga = 1,
    Manhwa = 2,
}

impl ContentType {
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn code(&self) -> &'static str {
        match self {
            ContentType::Novel => "NOVEL",
            ContentType::Manga => "MANGA",
            ContentType::Manhwa => "MANHWA",
        }
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(ContentType::Novel),
            1 => Some(ContentType::Manga),
            2 => Some(ContentType::Manhwa),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "NOVEL" => Some(ContentType::Novel),
            "MANGA" => Some(ContentType::Manga),
            "MANHWA" => Some(ContentType::Manhwa),
            _ => None,
        }
    }
}

/// Publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i16)]
pub enum ContentStatus {
    Ongoing = 0,
    Completed = 1,
    Hiatus = 2,
    Dropped = 3,
}

impl ContentStatus {
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn code(&self) -> &'static str {
        match self {
            ContentStatus::Ongoing => "ONGOING",
            ContentStatus::Completed => "COMPLETED",
            ContentStatus::Hiatus => "HIATUS",
            ContentStatus::Dropped => "DROPPED",
        }
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(ContentStatus::Ongoing),
            1 => Some(ContentStatus::Completed),
            2 => Some(ContentStatus::Hiatus),
            3 => Some(ContentStatus::Dropped),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "ONGOING" => Some(ContentStatus::Ongoing),
            "COMPLETED" => Some(ContentStatus::Completed),
            "HIATUS" => Some(ContentStatus::Hiatus),
            "DROPPED" => Some(ContentStatus::Dropped),
            _ => None,
        }
    }
}

// ============================================================================
// Sorting
// ============================================================================

/// Whitelisted sort fields
///
/// Anything outside this set is rejected with a 400 before any query
/// executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    Rating,
    Views,
}

/// Accepted `sortBy` values, in the order shown in error messages
pub const SORT_FIELD_WHITELIST: &[&str] = &["created_at", "updated_at", "title", "rating", "views"];

impl SortField {
    /// Parse a raw `sortBy` value against the whitelist
    pub fn parse(raw: &str) -> CatalogResult<Self> {
        match raw {
            "created_at" => Ok(SortField::CreatedAt),
            "updated_at" => Ok(SortField::UpdatedAt),
            "title" => Ok(SortField::Title),
            "rating" => Ok(SortField::Rating),
            "views" => Ok(SortField::Views),
            other => Err(CatalogError::InvalidSortField(format!(
                "sortBy must be one of {} (got '{other}')",
                SORT_FIELD_WHITELIST.join(", ")
            ))),
        }
    }

    /// Column used in ORDER BY
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "c.created_at",
            SortField::UpdatedAt => "c.updated_at",
            SortField::Title => "c.title",
            SortField::Rating => "c.rating",
            SortField::Views => "c.views",
        }
    }
}

/// Sort direction, defaulting to descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse leniently: anything other than `asc` falls back to `desc`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.to_lowercase()) {
            Some(s) if s == "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

// ============================================================================
// Filter clauses
// ============================================================================

/// One independently-optional predicate clause
///
/// The full predicate is the conjunction of all clauses present; no
/// combination can be invalid, the worst case is zero results.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// `content_type = ?`
    TypeEquals(ContentType),
    /// `status = ?`
    StatusEquals(ContentStatus),
    /// Case-insensitive substring over title and description
    TextSearch(String),
    /// Any-of: at least one join row whose genre is in the set
    AnyGenre(Vec<Uuid>),
    /// Any-of: at least one join row whose tag is in the set
    AnyTag(Vec<Uuid>),
}

/// Raw filter payload as it arrives from the client
#[derive(Debug, Clone, Default)]
pub struct RawContentFilter {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub genres: Vec<Uuid>,
    pub tags: Vec<Uuid>,
    pub status: Option<String>,
    pub content_type: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// A validated discovery query: predicate + ordering + pagination
#[derive(Debug, Clone)]
pub struct ContentQuery {
    pub filters: Vec<FilterClause>,
    pub sort: SortField,
    pub order: SortOrder,
    pub page: PageRequest,
}

impl ContentQuery {
    /// Validate and normalize a raw payload
    ///
    /// Only an out-of-whitelist `sortBy` (or non-positive page/limit) is
    /// rejected; unknown status/type codes and blank search strings
    /// impose no constraint.
    pub fn from_raw(raw: RawContentFilter) -> CatalogResult<Self> {
        let sort = match raw.sort_by.as_deref() {
            None => SortField::default(),
            Some(value) => SortField::parse(value)?,
        };
        let order = SortOrder::parse(raw.order.as_deref());
        let page = PageRequest::from_raw(raw.page, raw.limit)?;

        let mut filters = Vec::new();

        if let Some(ty) = raw.content_type.as_deref().and_then(ContentType::from_code) {
            filters.push(FilterClause::TypeEquals(ty));
        }
        if let Some(status) = raw.status.as_deref().and_then(ContentStatus::from_code) {
            filters.push(FilterClause::StatusEquals(status));
        }
        if let Some(needle) = raw.search.map(|s| s.trim().to_string())
            && !needle.is_empty()
        {
            filters.push(FilterClause::TextSearch(needle));
        }
        if !raw.genres.is_empty() {
            filters.push(FilterClause::AnyGenre(raw.genres));
        }
        if !raw.tags.is_empty() {
            filters.push(FilterClause::AnyTag(raw.tags));
        }

        Ok(Self {
            filters,
            sort,
            order,
            page,
        })
    }

    /// Pin the content type, overriding whatever the payload carried
    ///
    /// Used by the novels endpoints, where the type is fixed by the route.
    pub fn pin_type(mut self, ty: ContentType) -> Self {
        self.filters
            .retain(|c| !matches!(c, FilterClause::TypeEquals(_)));
        self.filters.push(FilterClause::TypeEquals(ty));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_whitelist() {
        for field in SORT_FIELD_WHITELIST {
            assert!(SortField::parse(field).is_ok());
        }

        let err = SortField::parse("password_hash").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("password_hash"));
        assert!(message.contains("created_at"));
        assert!(matches!(err, CatalogError::InvalidSortField(_)));
    }

    #[test]
    fn test_order_defaults_to_desc() {
        assert_eq!(SortOrder::parse(None), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("ASC")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("sideways")), SortOrder::Desc);
    }

    #[test]
    fn test_empty_payload_imposes_no_constraint() {
        let query = ContentQuery::from_raw(RawContentFilter::default()).unwrap();
        assert!(query.filters.is_empty());
        assert_eq!(query.sort, SortField::CreatedAt);
        assert_eq!(query.order, SortOrder::Desc);
        assert_eq!(query.page.page(), 1);
    }

    #[test]
    fn test_present_filters_become_clauses() {
        let genre = Uuid::new_v4();
        let raw = RawContentFilter {
            sort_by: Some("rating".to_string()),
            order: Some("asc".to_string()),
            genres: vec![genre],
            status: Some("ongoing".to_string()),
            content_type: Some("MANGA".to_string()),
            search: Some("  blade  ".to_string()),
            ..Default::default()
        };

        let query = ContentQuery::from_raw(raw).unwrap();
        assert_eq!(query.sort, SortField::Rating);
        assert_eq!(query.order, SortOrder::Asc);
        assert_eq!(query.filters.len(), 4);
        assert!(query
            .filters
            .contains(&FilterClause::TypeEquals(ContentType::Manga)));
        assert!(query
            .filters
            .contains(&FilterClause::StatusEquals(ContentStatus::Ongoing)));
        assert!(query
            .filters
            .contains(&FilterClause::TextSearch("blade".to_string())));
        assert!(query.filters.contains(&FilterClause::AnyGenre(vec![genre])));
    }

    #[test]
    fn test_unknown_enum_codes_are_ignored() {
        let raw = RawContentFilter {
            status: Some("PAUSED".to_string()),
            content_type: Some("AUDIOBOOK".to_string()),
            search: Some("   ".to_string()),
            ..Default::default()
        };
        let query = ContentQuery::from_raw(raw).unwrap();
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_invalid_sort_is_the_only_field_rejection() {
        let raw = RawContentFilter {
            sort_by: Some("author_secret".to_string()),
            ..Default::default()
        };
        assert!(ContentQuery::from_raw(raw).is_err());
    }

    #[test]
    fn test_pin_type_overrides_payload_type() {
        let raw = RawContentFilter {
            content_type: Some("MANGA".to_string()),
            ..Default::default()
        };
        let query = ContentQuery::from_raw(raw).unwrap().pin_type(ContentType::Novel);

        let types: Vec<_> = query
            .filters
            .iter()
            .filter(|c| matches!(c, FilterClause::TypeEquals(_)))
            .collect();
        assert_eq!(types, vec![&FilterClause::TypeEquals(ContentType::Novel)]);
    }

    #[test]
    fn test_enum_roundtrips() {
        for ty in [ContentType::Novel, ContentType::Manga, ContentType::Manhwa] {
            assert_eq!(ContentType::from_id(ty.id()), Some(ty));
            assert_eq!(ContentType::from_code(ty.code()), Some(ty));
        }
        for status in [
            ContentStatus::Ongoing,
            ContentStatus::Completed,
            ContentStatus::Hiatus,
            ContentStatus::Dropped,
        ] {
            assert_eq!(ContentStatus::from_id(status.id()), Some(status));
            assert_eq!(ContentStatus::from_code(status.code()), Some(status));
        }
    }
}
