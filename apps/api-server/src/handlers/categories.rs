//! Category listing.

use std::time::Duration;

use actix_web::{HttpResponse, web};

use scribe_core::domain::Category;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const CACHE_KEY: &str = "categories:all";
const CACHE_TTL: Duration = Duration::from_secs(60);

/// GET /api/categories
///
/// Categories are read-only, so the listing is served from the cache when
/// a fresh copy is available.
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    if let Some(cached) = state.cache.get(CACHE_KEY).await {
        if let Ok(categories) = serde_json::from_str::<Vec<Category>>(&cached) {
            return Ok(HttpResponse::Ok().json(categories));
        }
        // A corrupt entry falls through to a refetch.
    }

    let categories = state.categories.list().await?;

    let serialized = serde_json::to_string(&categories)
        .map_err(|e| AppError::Internal(format!("category serialization failed: {e}")))?;
    if let Err(e) = state
        .cache
        .set(CACHE_KEY, &serialized, Some(CACHE_TTL))
        .await
    {
        tracing::warn!("Failed to cache category listing: {}", e);
    }

    Ok(HttpResponse::Ok().json(categories))
}
