//! HTTP handlers and route configuration.

mod articles;
mod auth;
mod categories;
mod comments;
mod health;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Articles
            .route("/article", web::post().to(articles::create))
            .route("/article/{id}", web::get().to(articles::fetch))
            .route("/article/{id}", web::put().to(articles::update))
            .route("/article/{id}", web::delete().to(articles::remove))
            .route("/posts", web::get().to(articles::feed))
            // Categories & comments
            .route("/categories", web::get().to(categories::list))
            .route("/comments", web::get().to(comments::list))
            .route("/comments", web::post().to(comments::create))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            ),
    );
}
