use crate::errors::{not_found, AppResult};
use crate::model::post::{Post, PostRow, SortOrder};
use crate::model::tag::{Tag, TagFilter};
use sqlx::{query_as, QueryBuilder, Sqlite, SqlitePool};

impl Post {
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<PostRow>> {
        Ok(query_as::<_, PostRow>(
            "SELECT id, title, content, created_at, updated_at FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?)
    }

    /// A single post with its tags resolved, or `NotFound`.
    pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<Post> {
        let row = Post::find_by_id(pool, id)
            .await?
            .ok_or_else(|| not_found(&format!("post {} does not exist", id)))?;

        let mut post = Post::from(row);
        post.tags = Tag::list_for_post(pool, id).await?;
        Ok(post)
    }

    /// Total posts, or posts carrying `tag` when given.
    pub async fn count(pool: &SqlitePool, tag: Option<i64>) -> AppResult<i64> {
        let filter: TagFilter = tag.into_iter().collect();
        Post::count_matching(pool, &filter).await
    }

    /// Distinct posts carrying any tag in `filter`; every post when it is empty.
    pub async fn count_matching(pool: &SqlitePool, filter: &TagFilter) -> AppResult<i64> {
        // some posts have no tags at all, so the unfiltered count reads `posts`
        let mut builder = if filter.is_empty() {
            QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM posts")
        } else {
            QueryBuilder::<Sqlite>::new("SELECT COUNT(DISTINCT post_id) FROM post_tags")
        };

        if !filter.is_empty() {
            builder.push(" WHERE tag_id IN (");
            push_tag_ids(&mut builder, filter);
            builder.push(")");
        }

        let count: i64 = builder.build_query_scalar().fetch_one(pool).await?;
        Ok(count.max(0))
    }

    /// Up to `limit` posts starting `offset` rows into the ordered result.
    ///
    /// Tags are loaded with one query per post. That is fine for a personal
    /// blog but grows linearly with the page size.
    pub async fn list(
        pool: &SqlitePool,
        offset: i64,
        limit: i64,
        order: SortOrder,
        filter: &TagFilter,
    ) -> AppResult<Vec<Post>> {
        let mut builder = if filter.is_empty() {
            QueryBuilder::<Sqlite>::new(
                "SELECT p.id, p.title, p.content, p.created_at, p.updated_at FROM posts p",
            )
        } else {
            QueryBuilder::<Sqlite>::new(
                r#"
            SELECT DISTINCT p.id, p.title, p.content, p.created_at, p.updated_at
            FROM post_tags pt
            INNER JOIN posts p ON pt.post_id = p.id
            "#,
            )
        };

        if !filter.is_empty() {
            builder.push(" WHERE pt.tag_id IN (");
            push_tag_ids(&mut builder, filter);
            builder.push(")");
        }

        // `order` renders as a fixed keyword, never caller text
        builder.push(format!(" ORDER BY p.id {order}"));
        builder.push(" LIMIT ").push_bind(limit.max(0));
        builder.push(" OFFSET ").push_bind(offset.max(0));

        let mut posts = builder
            .build_query_as::<PostRow>()
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(Post::from)
            .collect::<Vec<_>>();

        for post in posts.iter_mut() {
            post.tags = Tag::list_for_post(pool, post.id()).await?;
        }

        Ok(posts)
    }
}

fn push_tag_ids(builder: &mut QueryBuilder<'_, Sqlite>, filter: &TagFilter) {
    let mut ids = builder.separated(", ");
    for id in filter.iter() {
        ids.push_bind(id);
    }
}
