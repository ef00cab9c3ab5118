use crate::errors::{AppError, AppResult};
use crate::model::post::{Post, SortOrder};
use crate::model::tag::{TagFilter, TagSelection};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Raw listing parameters as they arrive in the query string.
#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct ListingQuery {
    #[serde(deserialize_with = "blank_as_none")]
    pub limit: Option<i64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub page: Option<i64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub first: Option<i64>,
    #[validate(length(max = 1024, message = "too many tags"))]
    pub tags: Option<String>,
    pub sort_by: Option<String>,
}

/// `?page=` means the same as leaving `page` out; non-numeric text is still rejected.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(number) => number.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Parsed listing parameters handed to the planner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingRequest {
    pub page_size: Option<i64>,
    pub page: Option<i64>,
    pub offset: Option<i64>,
    pub tags: TagFilter,
    pub order: SortOrder,
}

impl TryFrom<ListingQuery> for ListingRequest {
    type Error = AppError;

    fn try_from(query: ListingQuery) -> AppResult<Self> {
        let tags = match query.tags {
            Some(ref raw) => TagFilter::parse(raw)?,
            None => TagFilter::none(),
        };

        Ok(ListingRequest {
            page_size: query.limit,
            page: query.page,
            offset: query.first,
            tags,
            order: SortOrder::from_param(query.sort_by.as_deref()),
        })
    }
}

/// Resolved window into the ordered post list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_size: i64,
    pub page: i64,
    pub offset: i64,
}

#[derive(Debug, Serialize)]
pub struct ListingResult {
    pub posts: Vec<Post>,
    pub tags: Vec<TagSelection>,

    pub page_size: i64,
    pub page: i64,
    pub offset: i64,
    pub total: i64,

    pub has_previous: bool,
    pub has_next: bool,
    pub prev_page: i64,
    pub next_page: i64,
    pub prev_first: i64,
    pub next_first: i64,

    pub sort_by_oldest: bool,
    pub tag_filter: String,
}
