use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Comment entity - attached to an article. Comments have no update or
/// delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a comment. Surrounding whitespace is
/// trimmed before the body is checked and persisted.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub user_id: Uuid,
    pub content: String,
}

impl NewComment {
    pub fn new(post_id: i64, user_id: Uuid, content: &str) -> Result<Self, DomainError> {
        if post_id <= 0 {
            return Err(DomainError::Validation(
                "post_id must be a positive integer".to_string(),
            ));
        }
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::Validation("content is required".to_string()));
        }

        Ok(Self {
            post_id,
            user_id,
            content: content.to_string(),
        })
    }

    pub fn into_comment(self, id: i64, now: DateTime<Utc>) -> Comment {
        Comment {
            id,
            post_id: self.post_id,
            user_id: self.user_id,
            content: self.content,
            created_at: now,
        }
    }
}
