use crate::errors::AppResult;
use crate::model::tag::Tag;
use sqlx::{query_as, SqlitePool};

impl Tag {
    pub async fn list_all(pool: &SqlitePool) -> AppResult<Vec<Tag>> {
        let tags = query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY id")
            .fetch_all(pool)
            .await?;

        Ok(tags)
    }

    /// Tags attached to one post, empty when it has none.
    pub async fn list_for_post(pool: &SqlitePool, post_id: i64) -> AppResult<Vec<Tag>> {
        let tags = query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name
            FROM post_tags pt
            INNER JOIN tags t ON pt.tag_id = t.id
            WHERE pt.post_id = ?
            ORDER BY t.id
            "#,
        )
        .bind(post_id)
        .fetch_all(pool)
        .await?;

        Ok(tags)
    }
}
