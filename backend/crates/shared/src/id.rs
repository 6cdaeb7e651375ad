//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities.

use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type ContentId = Id<markers::Content>;
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: uuid::Uuid,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random ID (UUID v4)
    pub fn new() -> Self {
        Self {
            value: Uuid::new_v4(),
            _marker: PhantomData,
        }
    }

    /// Create from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    /// Parse from a string representation
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self::from_uuid(Uuid::parse_str(s)?))
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    /// Convert to UUID
    pub fn into_uuid(self) -> Uuid {
        self.value
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct User;

    /// Marker for Content (novel/manga/manhwa) IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Content;

    /// Marker for Chapter IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Chapter;

    /// Marker for Genre IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Genre;

    /// Marker for Tag IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Tag;

    /// Marker for BlogPost IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BlogPost;

    /// Marker for BlogCategory IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BlogCategory;

    /// Marker for BlogTag IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BlogTag;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type ContentId = Id<markers::Content>;
pub type ChapterId = Id<markers::Chapter>;
pub type GenreId = Id<markers::Genre>;
pub type TagId = Id<markers::Tag>;
pub type BlogPostId = Id<markers::BlogPost>;
pub type BlogCategoryId = Id<markers::BlogCategory>;
pub type BlogTagId = Id<markers::BlogTag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let content_id: ContentId = Id::new();
        let user_id: UserId = Id::new();

        // These are different types, cannot be mixed
        let _c: Uuid = content_id.into_uuid();
        let _u: Uuid = user_id.into_uuid();
    }

    #[test]
    fn test_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id: ContentId = Id::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn test_id_parse() {
        let id: UserId = Id::new();
        let parsed = UserId::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, id);

        assert!(UserId::parse("not-a-uuid").is_err());
    }
}
