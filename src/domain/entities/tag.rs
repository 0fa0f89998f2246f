//! Tag entity for recipe categorization.

/// A recipe tag with a unique hex color and slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// Input data for creating a tag (fixture loading only; the API surface
/// for tags is read-only).
#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
    pub color: String,
    pub slug: String,
}
