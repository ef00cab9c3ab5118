#[cfg(test)]
mod tests {
    use crate::tests::fixture::{insert_post, insert_posts, seed_tagged_posts, setup_db};
    use plume::errors::AppError;
    use plume::model::post::{Post, SortOrder};
    use plume::model::tag::TagFilter;

    fn ids(posts: &[Post]) -> Vec<i64> {
        posts.iter().map(|p| p.id()).collect()
    }

    #[tokio::test]
    async fn test_count_all_and_by_tag() {
        let db = setup_db().await;
        seed_tagged_posts(&db).await;
        insert_post(&db, "untagged").await;

        assert_eq!(Post::count(&db, None).await.unwrap(), 6);
        assert_eq!(Post::count(&db, Some(2)).await.unwrap(), 3);
        assert_eq!(Post::count(&db, Some(5)).await.unwrap(), 2);
        assert_eq!(Post::count(&db, Some(4)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_count_matching_is_distinct() {
        let db = setup_db().await;
        seed_tagged_posts(&db).await;

        let filter = TagFilter::parse("2,5").unwrap();
        assert_eq!(Post::count_matching(&db, &filter).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_count_empty_table() {
        let db = setup_db().await;
        assert_eq!(Post::count(&db, None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_orders_by_id() {
        let db = setup_db().await;
        insert_posts(&db, 5).await;
        let none = TagFilter::none();

        let newest = Post::list(&db, 0, 10, SortOrder::NewestFirst, &none).await.unwrap();
        assert_eq!(ids(&newest), vec![5, 4, 3, 2, 1]);

        let oldest = Post::list(&db, 0, 10, SortOrder::OldestFirst, &none).await.unwrap();
        assert_eq!(ids(&oldest), vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_list_window() {
        let db = setup_db().await;
        insert_posts(&db, 25).await;
        let none = TagFilter::none();

        let page = Post::list(&db, 20, 10, SortOrder::OldestFirst, &none).await.unwrap();
        assert_eq!(ids(&page), vec![21, 22, 23, 24, 25]);

        let past_end = Post::list(&db, 100, 10, SortOrder::OldestFirst, &none).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_list_filter_is_union_without_duplicates() {
        let db = setup_db().await;
        seed_tagged_posts(&db).await;

        let filter = TagFilter::parse("2,5").unwrap();
        let posts = Post::list(&db, 0, 10, SortOrder::OldestFirst, &filter).await.unwrap();
        assert_eq!(ids(&posts), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_list_empty_filter_equals_no_filter() {
        let db = setup_db().await;
        seed_tagged_posts(&db).await;
        insert_post(&db, "untagged").await;

        let empty = TagFilter::parse("").unwrap();
        let filtered = Post::list(&db, 0, 10, SortOrder::NewestFirst, &empty).await.unwrap();
        let all = Post::list(&db, 0, 10, SortOrder::NewestFirst, &TagFilter::none())
            .await
            .unwrap();
        assert_eq!(ids(&filtered), ids(&all));
        assert_eq!(all.len(), 6);
    }

    #[tokio::test]
    async fn test_list_filter_without_matches() {
        let db = setup_db().await;
        seed_tagged_posts(&db).await;

        let filter = TagFilter::parse("4,99").unwrap();
        let posts = Post::list(&db, 0, 10, SortOrder::NewestFirst, &filter).await.unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_list_populates_tags() {
        let db = setup_db().await;
        seed_tagged_posts(&db).await;

        let filter = TagFilter::parse("5").unwrap();
        let posts = Post::list(&db, 0, 10, SortOrder::OldestFirst, &filter).await.unwrap();
        assert_eq!(ids(&posts), vec![3, 4]);

        let names: Vec<_> = posts[0].tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["rust", "music"]);
    }

    #[tokio::test]
    async fn test_get_post() {
        let db = setup_db().await;
        seed_tagged_posts(&db).await;

        let post = Post::get(&db, 3).await.unwrap();
        assert_eq!(post.row.title, "Post 3");
        assert_eq!(post.row.content, "<p>Post 3</p>");
        assert_eq!(post.row.updated_at, None);
        assert_eq!(post.tags.len(), 2);
    }

    #[tokio::test]
    async fn test_get_missing_post_is_not_found() {
        let db = setup_db().await;
        insert_posts(&db, 2).await;

        assert!(matches!(Post::get(&db, 42).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_not_found() {
        let db = setup_db().await;
        insert_posts(&db, 2).await;
        db.pool.close().await;

        assert!(matches!(Post::get(&db, 1).await, Err(AppError::Storage(_))));
        assert!(matches!(Post::count(&db, None).await, Err(AppError::Storage(_))));
    }
}
