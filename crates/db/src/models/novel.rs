//! Novel model and the fixed genre catalog.

use novelverse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// The twelve catalog genres, mapped to the PostgreSQL `genre` enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "genre")]
pub enum Genre {
    Fantasy,
    #[serde(rename = "Science Fiction")]
    #[sqlx(rename = "Science Fiction")]
    ScienceFiction,
    Romance,
    Mystery,
    Horror,
    Historical,
    Adventure,
    Drama,
    Thriller,
    Comedy,
    Poetry,
    Other,
}

impl Genre {
    /// Display form, identical to the wire and database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fantasy => "Fantasy",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Romance => "Romance",
            Genre::Mystery => "Mystery",
            Genre::Horror => "Horror",
            Genre::Historical => "Historical",
            Genre::Adventure => "Adventure",
            Genre::Drama => "Drama",
            Genre::Thriller => "Thriller",
            Genre::Comedy => "Comedy",
            Genre::Poetry => "Poetry",
            Genre::Other => "Other",
        }
    }
}

/// A row from the `novels` table.
///
/// `rating` and `review_count` are maintained from the comments table;
/// `likes` mirrors the count of like rows. The storage layer owns keeping
/// them consistent (see the `Storage` trait docs).
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Novel {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub cover_image: Option<String>,
    pub description: String,
    pub genre: Genre,
    pub tags: Vec<String>,
    pub rating: i32,
    pub review_count: i32,
    pub is_featured: bool,
    pub is_trending: bool,
    pub views: i32,
    pub likes: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by: Option<DbId>,
}

/// DTO for creating a novel. `created_by` is set by the API layer from the
/// authenticated admin, never from the request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNovel {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "author must be 1-255 characters"))]
    pub author: String,
    pub cover_image: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    pub genre: Genre,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_trending: bool,
    #[serde(skip_deserializing)]
    pub created_by: Option<DbId>,
}

/// DTO for partial novel updates.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNovel {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255, message = "author must be 1-255 characters"))]
    pub author: Option<String>,
    pub cover_image: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    pub genre: Option<Genre>,
    pub tags: Option<Vec<String>>,
    pub is_featured: Option<bool>,
    pub is_trending: Option<bool>,
    pub views: Option<i32>,
}

/// Listing filter for `GET /api/novels`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NovelFilter {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub genre: Option<Genre>,
}
