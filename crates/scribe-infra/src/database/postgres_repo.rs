//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
};

use scribe_core::domain::{Article, Category, Comment, NewArticle, NewComment, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{
    ArticleRepository, CategoryRepository, CommentRepository, UserRepository,
};

use super::entity::article::{self, Entity as ArticleEntity};
use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL article repository.
pub type PostgresArticleRepository = PostgresBaseRepository<ArticleEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

fn map_write_err(e: DbErr) -> RepoError {
    if matches!(e, DbErr::RecordNotUpdated) {
        return RepoError::NotFound;
    }
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("entity already exists".to_string())
    } else if err_str.contains("foreign key") {
        RepoError::Constraint("referenced entity does not exist".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn create(&self, draft: NewArticle) -> Result<Article, RepoError> {
        let now = Utc::now();
        let row = article::ActiveModel {
            id: NotSet,
            user_id: Set(draft.user_id),
            category_id: Set(draft.category_id),
            title: Set(draft.title),
            content: Set(draft.content),
            image_path: Set(draft.image_path),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = row.insert(&self.db).await.map_err(map_write_err)?;
        Ok(model.into())
    }

    async fn update(&self, article: Article) -> Result<Article, RepoError> {
        let active: article::ActiveModel = article.into();
        let model = active.update(&self.db).await.map_err(map_write_err)?;
        Ok(model.into())
    }

    async fn list_recent(&self) -> Result<Vec<Article>, RepoError> {
        let result = ArticleEntity::find()
            .order_by_desc(article::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, draft: NewComment) -> Result<Comment, RepoError> {
        let row = comment::ActiveModel {
            id: NotSet,
            post_id: Set(draft.post_id),
            user_id: Set(draft.user_id),
            content: Set(draft.content),
            created_at: Set(Utc::now().into()),
        };

        let model = row.insert(&self.db).await.map_err(map_write_err)?;
        Ok(model.into())
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_desc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, RepoError> {
        let active: user::ActiveModel = user.into();
        let model = active.insert(&self.db).await.map_err(map_write_err)?;
        Ok(model.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = match email.find('@') {
            Some(at_pos) => {
                let (local, domain) = email.split_at(at_pos);
                if local.len() > 1 {
                    format!("{}***{}", &local[..1], domain)
                } else {
                    format!("***{domain}")
                }
            }
            None => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}
