use crate::errors::AppResult;
use crate::model::listing::{ListingRequest, ListingResult, Pagination};
use crate::model::post::Post;
use crate::model::tag::{Tag, TagSelection};
use sqlx::SqlitePool;
use std::future::Future;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::debug;

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Point in time by which every storage call of one request must finish.
#[derive(Debug, Clone, Copy)]
pub struct Deadline(Instant);

impl Deadline {
    /// Timeouts too large to represent end a year from now.
    pub fn after(timeout: Duration) -> Self {
        let now = Instant::now();
        let at = now
            .checked_add(timeout)
            .unwrap_or_else(|| now + Duration::from_secs(365 * 24 * 60 * 60));
        Deadline(at)
    }

    pub async fn run<F, T>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        timeout_at(self.0, fut).await?
    }
}

/// Turns listing requests into listing results.
///
/// Holds no state of its own besides the limits it clamps to; the pool is
/// borrowed per call.
#[derive(Debug, Clone, Copy)]
pub struct ListingPlanner {
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl Default for ListingPlanner {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: 100,
        }
    }
}

impl ListingPlanner {
    pub fn new(default_page_size: i64, max_page_size: i64) -> Self {
        let max_page_size = max_page_size.max(1);
        Self {
            default_page_size: default_page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }

    /// Resolves page size, page number and row offset.
    ///
    /// An explicit non-negative offset wins over the page number.
    pub fn paginate(&self, request: &ListingRequest) -> Pagination {
        let page_size = match request.page_size {
            Some(size) if size > 0 => size.min(self.max_page_size),
            _ => self.default_page_size,
        };
        let page = request.page.unwrap_or(1).max(1);

        let offset = match request.offset {
            Some(offset) if offset >= 0 => offset,
            _ => page_size.saturating_mul(page - 1).max(0),
        };

        Pagination {
            page_size,
            page,
            offset,
        }
    }

    pub async fn list(
        &self,
        pool: &SqlitePool,
        request: &ListingRequest,
        deadline: Deadline,
    ) -> AppResult<ListingResult> {
        let Pagination {
            page_size,
            page,
            offset,
        } = self.paginate(request);
        let filter = &request.tags;

        debug!(
            "listing posts: offset={} limit={} order={} tags={:?}",
            offset,
            page_size,
            request.order,
            filter.to_query_value()
        );

        // the total is counted with the same filter as the page itself
        let (posts, total, all_tags) = tokio::try_join!(
            deadline.run(Post::list(pool, offset, page_size, request.order, filter)),
            deadline.run(Post::count_matching(pool, filter)),
            deadline.run(Tag::list_all(pool)),
        )?;

        let shown = offset.saturating_add(posts.len() as i64);
        let tags = all_tags
            .into_iter()
            .map(|tag| TagSelection::new(tag, filter))
            .collect();

        Ok(ListingResult {
            posts,
            tags,
            page_size,
            page,
            offset,
            total,
            has_previous: offset > 0,
            has_next: shown < total,
            prev_page: (page - 1).max(1),
            next_page: page.saturating_add(1),
            prev_first: offset.saturating_sub(page_size).max(0),
            next_first: offset.saturating_add(page_size),
            sort_by_oldest: !request.order.is_newest_first(),
            tag_filter: filter.to_query_value(),
        })
    }
}
