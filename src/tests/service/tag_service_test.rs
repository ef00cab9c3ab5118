#[cfg(test)]
mod tests {
    use crate::tests::fixture::{insert_post, insert_tag, seed_tagged_posts, setup_db, tag_post};
    use plume::errors::AppError;
    use plume::model::tag::Tag;

    #[tokio::test]
    async fn test_list_all_in_id_order() {
        let db = setup_db().await;
        seed_tagged_posts(&db).await;

        let tags = Tag::list_all(&db).await.unwrap();
        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["go", "rust", "linux", "vim", "music"]);
        assert_eq!(tags.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let db = setup_db().await;
        assert!(Tag::list_all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_for_post() {
        let db = setup_db().await;
        seed_tagged_posts(&db).await;

        let tags = Tag::list_for_post(&db, 3).await.unwrap();
        assert_eq!(
            tags,
            vec![
                Tag { id: 2, name: "rust".to_string() },
                Tag { id: 5, name: "music".to_string() },
            ]
        );
    }

    #[tokio::test]
    async fn test_untagged_post_has_no_tags() {
        let db = setup_db().await;
        insert_tag(&db, "rust").await;
        let post = insert_post(&db, "untagged").await;

        assert!(Tag::list_for_post(&db, post).await.unwrap().is_empty());
        // a post that does not exist is not an error either
        assert!(Tag::list_for_post(&db, 404).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tags_follow_association_changes() {
        let db = setup_db().await;
        let post = insert_post(&db, "hello").await;
        let tag = insert_tag(&db, "rust").await;
        tag_post(&db, post, tag).await;

        assert_eq!(Tag::list_for_post(&db, post).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported() {
        let db = setup_db().await;
        db.pool.close().await;

        assert!(matches!(Tag::list_all(&db).await, Err(AppError::Storage(_))));
        assert!(matches!(
            Tag::list_for_post(&db, 1).await,
            Err(AppError::Storage(_))
        ));
    }
}
