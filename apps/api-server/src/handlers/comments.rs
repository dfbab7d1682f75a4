//! Comment listing and creation.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use scribe_core::domain::NewComment;
use scribe_shared::dto::CreateCommentRequest;

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommentListQuery {
    post_id: Option<String>,
}

fn parse_post_id(raw: Option<&str>) -> Result<i64, AppError> {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest("post_id must be a positive integer".to_string()))
}

/// GET /api/comments?post_id=
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<CommentListQuery>,
) -> AppResult<HttpResponse> {
    let post_id = parse_post_id(query.post_id.as_deref())?;

    let comments = state.comments.list_for_post(post_id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// POST /api/comments
///
/// Any caller may comment on any article; anonymous requests are recorded
/// against the configured fallback author.
pub async fn create(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let author = identity
        .0
        .map(|i| i.user_id)
        .unwrap_or(state.fallback_author);

    let draft = NewComment::new(req.post_id, author, &req.content)?;
    let comment = state.comments.create(draft).await?;

    Ok(HttpResponse::Created().json(comment))
}
