use crate::model::tag::Tag;
use derive_more::Display;
use serde::Serialize;
use sqlx::FromRow;

// which Rust types correspond to which sqlite column types:
// https://docs.rs/sqlx/latest/sqlx/sqlite/types/index.html
#[derive(Debug, Serialize, FromRow, Clone, PartialEq)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Post {
    #[serde(flatten)]
    pub row: PostRow,

    pub tags: Vec<Tag>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self { row, tags: vec![] }
    }
}

impl Post {
    pub fn id(&self) -> i64 {
        self.row.id
    }
}

/// Identifiers are assigned monotonically, so "newest" means highest id.
#[derive(Debug, Display, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    #[display("DESC")]
    NewestFirst,
    #[display("ASC")]
    OldestFirst,
}

impl SortOrder {
    /// Only `"oldest"` flips the order; anything else keeps the default.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("oldest") => SortOrder::OldestFirst,
            _ => SortOrder::NewestFirst,
        }
    }

    pub fn is_newest_first(&self) -> bool {
        matches!(self, SortOrder::NewestFirst)
    }
}
