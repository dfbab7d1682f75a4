//! Article CRUD and feed.
//!
//! Mutations follow one sequence: resolve identity, confirm the row
//! exists, check ownership, validate input, then write. The image is
//! stored before the row write; if the row write then fails the object is
//! left behind (nothing reconciles it).

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures_util::StreamExt as _;
use uuid::Uuid;

use scribe_core::domain::NewArticle;
use scribe_core::listing::{DEFAULT_PAGE_SIZE, Feed};
use scribe_shared::MessageResponse;
use scribe_shared::dto::{FeedPageResponse, FeedQuery};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Uploads are limited to JPEG and PNG images.
fn accepted_image(content_type: &str) -> bool {
    content_type == mime::IMAGE_JPEG.essence_str()
        || content_type == mime::IMAGE_PNG.essence_str()
}

/// Parse a path segment as an article id. Ids are positive integers.
fn parse_article_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest("invalid article id".to_string()))
}

/// An uploaded image: original filename, content type, bytes.
struct ImageUpload {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Object key: current timestamp plus the original file extension.
    fn object_key(&self, now_millis: i64) -> String {
        let ext = self
            .filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .unwrap_or("png");
        format!("{now_millis}.{ext}")
    }
}

/// The article form as it arrives over multipart.
#[derive(Default)]
struct ArticleForm {
    title: Option<String>,
    content: Option<String>,
    category_id: Option<String>,
    image: Option<ImageUpload>,
}

impl ArticleForm {
    /// Drain a multipart payload into the known fields. Unknown fields are
    /// ignored.
    async fn read(mut payload: Multipart) -> Result<Self, AppError> {
        let mut form = ArticleForm::default();

        while let Some(item) = payload.next().await {
            let mut field =
                item.map_err(|e| AppError::BadRequest(format!("malformed form data: {e}")))?;

            let name = field.name().to_string();
            let filename = field
                .content_disposition()
                .get_filename()
                .map(ToOwned::to_owned);
            let content_type = field
                .content_type()
                .map(|m| m.essence_str().to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());

            let mut bytes = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk =
                    chunk.map_err(|e| AppError::BadRequest(format!("malformed form data: {e}")))?;
                bytes.extend_from_slice(&chunk);
            }

            match name.as_str() {
                "title" => form.title = Some(text_value(bytes)?),
                "content" => form.content = Some(text_value(bytes)?),
                "category_id" => form.category_id = Some(text_value(bytes)?),
                "image" => {
                    form.image = Some(ImageUpload {
                        filename: filename.unwrap_or_default(),
                        content_type,
                        bytes,
                    })
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// The mandatory text fields, or a 400 when one is missing.
    fn required_fields(&self) -> Result<(String, i64), AppError> {
        let content = self.content.clone().filter(|c| !c.is_empty());
        let category_id = self
            .category_id
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok());

        match (content, category_id) {
            (Some(content), Some(category_id)) => Ok((content, category_id)),
            _ => Err(AppError::BadRequest(
                "content, category_id, and image are required".to_string(),
            )),
        }
    }
}

fn text_value(bytes: Vec<u8>) -> Result<String, AppError> {
    String::from_utf8(bytes)
        .map_err(|_| AppError::BadRequest("form field is not valid UTF-8".to_string()))
}

/// Store an uploaded image and return its public URL.
async fn store_image(state: &AppState, image: &ImageUpload) -> AppResult<String> {
    if !accepted_image(&image.content_type) {
        return Err(AppError::BadRequest(
            "image must be a JPEG or PNG".to_string(),
        ));
    }

    let key = image.object_key(chrono::Utc::now().timestamp_millis());
    let url = state
        .storage
        .put(&key, &image.content_type, image.bytes.clone())
        .await?;
    Ok(url)
}

/// GET /api/article/{id}
pub async fn fetch(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_article_id(&path)?;

    let article = state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("article not found".to_string()))?;

    Ok(HttpResponse::Ok().json(article))
}

/// POST /api/article
///
/// Anonymous requests are attributed to the configured fallback author.
pub async fn create(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let form = ArticleForm::read(payload).await?;
    let (content, category_id) = form.required_fields()?;
    let image = form.image.as_ref().ok_or_else(|| {
        AppError::BadRequest("content, category_id, and image are required".to_string())
    })?;

    let author = identity
        .0
        .map(|i| i.user_id)
        .unwrap_or(state.fallback_author);

    let image_path = store_image(&state, image).await?;

    let draft = NewArticle::new(author, category_id, form.title.clone(), content, image_path)?;
    let article = state.articles.create(draft).await?;

    tracing::info!(article_id = article.id, "Article created");
    Ok(HttpResponse::Created().json(article))
}

/// PUT /api/article/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let id = parse_article_id(&path)?;

    let mut article = state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("article not found".to_string()))?;

    if !article.owned_by(identity.user_id) {
        return Err(AppError::Forbidden);
    }

    let form = ArticleForm::read(payload).await?;
    let (content, category_id) = form.required_fields()?;

    // A new image replaces the stored reference; otherwise the existing
    // one is kept.
    let image_path = match form.image.as_ref() {
        Some(image) => store_image(&state, image).await?,
        None => article.image_path.clone(),
    };

    let edit = NewArticle::new(
        article.user_id,
        category_id,
        form.title.clone(),
        content,
        image_path,
    )?;
    article.apply(edit, chrono::Utc::now());
    state.articles.update(article).await?;

    tracing::info!(article_id = id, "Article updated");
    Ok(HttpResponse::Ok().json(MessageResponse::new("article updated")))
}

/// DELETE /api/article/{id}
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_article_id(&path)?;

    let article = state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("article not found".to_string()))?;

    if !article.owned_by(identity.user_id) {
        return Err(AppError::Forbidden);
    }

    state.articles.delete(id).await?;

    tracing::info!(article_id = id, "Article deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new("article deleted")))
}

/// GET /api/posts
///
/// The stored articles, newest first, run through the feed filter and
/// pagination.
pub async fn feed(
    state: web::Data<AppState>,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let author = match query.author.as_deref() {
        Some(raw) => Some(
            raw.parse::<Uuid>()
                .map_err(|_| AppError::BadRequest("author must be a user id".to_string()))?,
        ),
        None => None,
    };

    let articles = state.articles.list_recent().await?;

    let mut feed = Feed::new(articles, DEFAULT_PAGE_SIZE);
    if let Some(search) = query.search.as_deref() {
        feed.set_search(search);
    }
    feed.select_author(author);
    if let Some(page) = query.page {
        feed.change_page(page);
    }

    let posts = feed.page_items().into_iter().cloned().collect();
    Ok(HttpResponse::Ok().json(FeedPageResponse {
        posts,
        page: feed.current_page(),
        total_pages: feed.total_pages(),
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use uuid::Uuid;

    use crate::handlers::test_support::{
        bearer_for, multipart_body, state_with_store, token_service,
    };

    const BOUNDARY: &str = "ArticleFormBoundary";

    macro_rules! articles_app {
        ($state:expr, $tokens:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .app_data(web::Data::new($tokens))
                    .route("/api/article", web::post().to(super::create))
                    .route("/api/article/{id}", web::get().to(super::fetch))
                    .route("/api/article/{id}", web::put().to(super::update))
                    .route("/api/article/{id}", web::delete().to(super::remove))
                    .route("/api/posts", web::get().to(super::feed)),
            )
            .await
        };
    }

    fn form_request(
        method: test::TestRequest,
        uri: &str,
        parts: &[(&str, Option<&str>, Option<&str>, &[u8])],
    ) -> test::TestRequest {
        method
            .uri(uri)
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_body(BOUNDARY, parts))
    }

    fn full_form<'a>(content: &'a str, category_id: &'a str) -> Vec<(&'a str, Option<&'a str>, Option<&'a str>, &'a [u8])> {
        vec![
            ("content", None, None, content.as_bytes()),
            ("category_id", None, None, category_id.as_bytes()),
            (
                "image",
                Some("cover.png"),
                Some("image/png"),
                b"\x89PNG\r\n\x1a\n" as &[u8],
            ),
        ]
    }

    #[actix_web::test]
    async fn create_without_title_populates_required_fields() {
        let (state, store) = state_with_store();
        let app = articles_app!(state, token_service());

        let req = form_request(
            test::TestRequest::post(),
            "/api/article",
            &full_form("hello", "2"),
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["title"].is_null());
        assert_eq!(body["category_id"], 2);
        assert_eq!(body["user_id"], Uuid::nil().to_string());
        let image_path = body["image_path"].as_str().unwrap();
        assert!(image_path.starts_with("https://media.test/"));
        assert!(image_path.ends_with(".png"));
        assert_eq!(store.len().await, 1);
    }

    #[actix_web::test]
    async fn create_rejects_missing_fields() {
        let (state, store) = state_with_store();
        let app = articles_app!(state, token_service());

        let incomplete: Vec<Vec<(&str, Option<&str>, Option<&str>, &[u8])>> = vec![
            // no content
            vec![
                ("category_id", None, None, b"2" as &[u8]),
                ("image", Some("a.png"), Some("image/png"), b"img" as &[u8]),
            ],
            // no category
            vec![
                ("content", None, None, b"hello" as &[u8]),
                ("image", Some("a.png"), Some("image/png"), b"img" as &[u8]),
            ],
            // no image
            vec![
                ("content", None, None, b"hello" as &[u8]),
                ("category_id", None, None, b"2" as &[u8]),
            ],
            // non-numeric category
            vec![
                ("content", None, None, b"hello" as &[u8]),
                ("category_id", None, None, b"abc" as &[u8]),
                ("image", Some("a.png"), Some("image/png"), b"img" as &[u8]),
            ],
        ];

        for parts in &incomplete {
            let req = form_request(test::TestRequest::post(), "/api/article", parts).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 400);
        }
        // Nothing was uploaded for any rejected form
        assert!(store.is_empty().await);
    }

    #[actix_web::test]
    async fn create_rejects_non_image_upload() {
        let (state, _) = state_with_store();
        let app = articles_app!(state, token_service());

        let parts: Vec<(&str, Option<&str>, Option<&str>, &[u8])> = vec![
            ("content", None, None, b"hello" as &[u8]),
            ("category_id", None, None, b"2" as &[u8]),
            ("image", Some("a.gif"), Some("image/gif"), b"GIF89a" as &[u8]),
        ];
        let req = form_request(test::TestRequest::post(), "/api/article", &parts).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn fetch_validates_id_and_existence() {
        let (state, _) = state_with_store();
        let app = articles_app!(state, token_service());

        for bad in ["abc", "0", "-1", "1.5"] {
            let req = test::TestRequest::get()
                .uri(&format!("/api/article/{bad}"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 400, "id: {bad}");
        }

        let req = test::TestRequest::get().uri("/api/article/99").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn update_requires_authentication() {
        let (state, _) = state_with_store();
        let app = articles_app!(state, token_service());

        let req = form_request(
            test::TestRequest::put(),
            "/api/article/1",
            &full_form("hello", "2"),
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn update_enforces_ownership() {
        let (state, _) = state_with_store();
        let tokens = token_service();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();

        // Seed a row owned by `owner`
        let app = articles_app!(state.clone(), tokens.clone());
        let req = form_request(
            test::TestRequest::post(),
            "/api/article",
            &full_form("original", "1"),
        )
        .insert_header(("authorization", bearer_for(&tokens, owner)))
        .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_i64().unwrap();

        let req = form_request(
            test::TestRequest::put(),
            &format!("/api/article/{id}"),
            &full_form("hijacked", "1"),
        )
        .insert_header(("authorization", bearer_for(&tokens, intruder)))
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);

        // Row unchanged
        let req = test::TestRequest::get()
            .uri(&format!("/api/article/{id}"))
            .to_request();
        let row: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(row["content"], "original");
    }

    #[actix_web::test]
    async fn update_without_image_keeps_existing_reference() {
        let (state, store) = state_with_store();
        let tokens = token_service();
        let owner = Uuid::new_v4();
        let app = articles_app!(state, tokens.clone());

        let req = form_request(
            test::TestRequest::post(),
            "/api/article",
            &full_form("first", "1"),
        )
        .insert_header(("authorization", bearer_for(&tokens, owner)))
        .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_i64().unwrap();
        let original_image = created["image_path"].as_str().unwrap().to_string();

        let parts: Vec<(&str, Option<&str>, Option<&str>, &[u8])> = vec![
            ("title", None, None, b"Edited" as &[u8]),
            ("content", None, None, b"second" as &[u8]),
            ("category_id", None, None, b"2" as &[u8]),
        ];
        let req = form_request(test::TestRequest::put(), &format!("/api/article/{id}"), &parts)
            .insert_header(("authorization", bearer_for(&tokens, owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let req = test::TestRequest::get()
            .uri(&format!("/api/article/{id}"))
            .to_request();
        let row: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(row["image_path"], original_image.as_str());
        assert_eq!(row["content"], "second");
        assert_eq!(row["title"], "Edited");
        assert_eq!(store.len().await, 1);
    }

    #[actix_web::test]
    async fn update_with_image_replaces_reference() {
        let (state, store) = state_with_store();
        let tokens = token_service();
        let owner = Uuid::new_v4();
        let app = articles_app!(state, tokens.clone());

        let req = form_request(
            test::TestRequest::post(),
            "/api/article",
            &full_form("first", "1"),
        )
        .insert_header(("authorization", bearer_for(&tokens, owner)))
        .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_i64().unwrap();

        let parts: Vec<(&str, Option<&str>, Option<&str>, &[u8])> = vec![
            ("content", None, None, b"second" as &[u8]),
            ("category_id", None, None, b"1" as &[u8]),
            (
                "image",
                Some("replacement.jpg"),
                Some("image/jpeg"),
                b"\xff\xd8\xff" as &[u8],
            ),
        ];
        let req = form_request(test::TestRequest::put(), &format!("/api/article/{id}"), &parts)
            .insert_header(("authorization", bearer_for(&tokens, owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let req = test::TestRequest::get()
            .uri(&format!("/api/article/{id}"))
            .to_request();
        let row: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let image_path = row["image_path"].as_str().unwrap();
        assert!(image_path.ends_with(".jpg"));
        assert_eq!(store.len().await, 2);
    }

    #[actix_web::test]
    async fn delete_flow_enforces_the_full_sequence() {
        let (state, _) = state_with_store();
        let tokens = token_service();
        let owner = Uuid::new_v4();
        let app = articles_app!(state, tokens.clone());

        // 401 without credentials
        let req = test::TestRequest::delete().uri("/api/article/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        // 400 for a malformed id
        let req = test::TestRequest::delete()
            .uri("/api/article/abc")
            .insert_header(("authorization", bearer_for(&tokens, owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        // 404 for a missing row
        let req = test::TestRequest::delete()
            .uri("/api/article/41")
            .insert_header(("authorization", bearer_for(&tokens, owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        // Seed and delete as a non-owner: 403
        let req = form_request(
            test::TestRequest::post(),
            "/api/article",
            &full_form("mine", "1"),
        )
        .insert_header(("authorization", bearer_for(&tokens, owner)))
        .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_i64().unwrap();

        let req = test::TestRequest::delete()
            .uri(&format!("/api/article/{id}"))
            .insert_header(("authorization", bearer_for(&tokens, Uuid::new_v4())))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);

        // Owner succeeds, and the row is gone
        let req = test::TestRequest::delete()
            .uri(&format!("/api/article/{id}"))
            .insert_header(("authorization", bearer_for(&tokens, owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let req = test::TestRequest::get()
            .uri(&format!("/api/article/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn feed_paginates_and_ignores_out_of_range_pages() {
        let (state, _) = state_with_store();
        let tokens = token_service();
        let author = Uuid::new_v4();
        let app = articles_app!(state, tokens.clone());

        for i in 0..12 {
            let content = format!("post {i}");
            let parts: Vec<(&str, Option<&str>, Option<&str>, &[u8])> = vec![
                ("title", None, None, b"Feed Post" as &[u8]),
                ("content", None, None, content.as_bytes()),
                ("category_id", None, None, b"1" as &[u8]),
                ("image", Some("a.png"), Some("image/png"), b"img" as &[u8]),
            ];
            let req = form_request(test::TestRequest::post(), "/api/article", &parts)
                .insert_header(("authorization", bearer_for(&tokens, author)))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 201);
        }

        // 12 articles, page size 9: two pages
        let req = test::TestRequest::get().uri("/api/posts?page=2").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["page"], 2);
        assert_eq!(body["total_pages"], 2);
        assert_eq!(body["posts"].as_array().unwrap().len(), 3);

        // Out-of-range page request stays on page 1
        let req = test::TestRequest::get().uri("/api/posts?page=9").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["page"], 1);
        assert_eq!(body["posts"].as_array().unwrap().len(), 9);

        // Unknown author filters everything out
        let req = test::TestRequest::get()
            .uri(&format!("/api/posts?author={}", Uuid::new_v4()))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total_pages"], 1);
        assert!(body["posts"].as_array().unwrap().is_empty());

        // Malformed author is a 400
        let req = test::TestRequest::get()
            .uri("/api/posts?author=not-a-uuid")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }
}
