//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

use scribe_core::domain::Article;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Response describing the authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    pub id: String,
    pub email: String,
}

/// Request to create a comment on an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub post_id: i64,
    pub content: String,
}

/// Query parameters accepted by the article feed endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedQuery {
    pub search: Option<String>,
    /// Author user id (UUID) to filter by, exact match.
    pub author: Option<String>,
    pub page: Option<usize>,
}

/// One page of the article feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPageResponse {
    pub posts: Vec<Article>,
    pub page: usize,
    pub total_pages: usize,
}
