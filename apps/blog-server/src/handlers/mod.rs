//! HTTP request handlers.

mod health;
mod pages;

use actix_web::web;

/// Configure all routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::index))
        .route("/posts/{slug}/", web::get().to(pages::post_detail))
        .route("/tags/{title}/", web::get().to(pages::tag_filter))
        .route("/contacts/", web::get().to(pages::contacts))
        .route("/api/health", web::get().to(health::health_check));
}
