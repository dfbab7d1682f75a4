use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Article entity - a published blog post.
///
/// `id` is assigned by the store; `user_id` is the owner and never changes
/// after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub user_id: Uuid,
    pub category_id: i64,
    pub title: Option<String>,
    pub content: String,
    pub image_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Whether `caller` may mutate this article.
    pub fn owned_by(&self, caller: Uuid) -> bool {
        self.user_id == caller
    }

    /// Apply an edit: replace the mutable fields and stamp `updated_at`.
    /// The owner reference is left untouched.
    pub fn apply(&mut self, draft: NewArticle, now: DateTime<Utc>) {
        self.category_id = draft.category_id;
        self.title = draft.title;
        self.content = draft.content;
        self.image_path = draft.image_path;
        self.updated_at = now;
    }
}

/// Validated input for creating an article (or replacing the editable
/// fields of an existing one). `image_path` is the already-resolved public
/// URL of the stored image.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub user_id: Uuid,
    pub category_id: i64,
    pub title: Option<String>,
    pub content: String,
    pub image_path: String,
}

impl NewArticle {
    pub fn new(
        user_id: Uuid,
        category_id: i64,
        title: Option<String>,
        content: String,
        image_path: String,
    ) -> Result<Self, DomainError> {
        if content.is_empty() {
            return Err(DomainError::Validation("content is required".to_string()));
        }
        if category_id <= 0 {
            return Err(DomainError::Validation(
                "category_id must be a positive integer".to_string(),
            ));
        }
        if image_path.is_empty() {
            return Err(DomainError::Validation("image is required".to_string()));
        }

        Ok(Self {
            user_id,
            category_id,
            title: title.filter(|t| !t.is_empty()),
            content,
            image_path,
        })
    }

    /// Materialize into a full row. Only meaningful for in-memory stores;
    /// SQL stores assign the id themselves.
    pub fn into_article(self, id: i64, now: DateTime<Utc>) -> Article {
        Article {
            id,
            user_id: self.user_id,
            category_id: self.category_id,
            title: self.title,
            content: self.content,
            image_path: self.image_path,
            created_at: now,
            updated_at: now,
        }
    }
}
