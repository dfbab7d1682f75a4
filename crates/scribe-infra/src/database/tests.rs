#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use scribe_core::domain::{Article, NewArticle};
    use scribe_core::error::RepoError;
    use scribe_core::ports::{ArticleRepository, BaseRepository};

    use crate::database::entity::article;
    use crate::database::postgres_repo::PostgresArticleRepository;

    fn article_model(id: i64, user_id: Uuid) -> article::Model {
        let now = Utc::now();
        article::Model {
            id,
            user_id,
            category_id: 2,
            title: Some("Test Post".to_owned()),
            content: "Content".to_owned(),
            image_path: "https://media.example/1.png".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_article_by_id() {
        let user_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![article_model(7, user_id)]])
            .into_connection();

        let repo = PostgresArticleRepository::new(db);

        let result: Option<Article> = repo.find_by_id(7).await.unwrap();

        let article = result.unwrap();
        assert_eq!(article.id, 7);
        assert_eq!(article.user_id, user_id);
        assert_eq!(article.title.as_deref(), Some("Test Post"));
    }

    #[tokio::test]
    async fn test_create_returns_inserted_row() {
        let user_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 1,
                rows_affected: 1,
            }])
            .append_query_results(vec![vec![article_model(1, user_id)]])
            .into_connection();

        let repo = PostgresArticleRepository::new(db);

        let draft = NewArticle::new(
            user_id,
            2,
            Some("Test Post".to_string()),
            "Content".to_string(),
            "https://media.example/1.png".to_string(),
        )
        .unwrap();

        let created = repo.create(draft).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.category_id, 2);
    }

    #[tokio::test]
    async fn test_delete_miss_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresArticleRepository::new(db);

        let result: Result<(), RepoError> =
            BaseRepository::<Article, i64>::delete(&repo, 42).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
