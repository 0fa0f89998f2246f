//! DTOs for tag endpoints.

use serde::Serialize;

use crate::domain::entities::Tag;

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            color: tag.color,
            slug: tag.slug,
        }
    }
}
