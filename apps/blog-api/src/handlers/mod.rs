//! HTTP handlers and route configuration.

mod body;
pub mod posts;

pub use body::JsonObject;

use actix_web::{HttpResponse, web};
use blog_shared::MessageResponse;

/// Configure all application routes.
///
/// A known path with an unsupported method falls through to [`not_found`].
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/posts")
            .route(web::get().to(posts::list_posts))
            .route(web::post().to(posts::create_post))
            .default_service(web::to(not_found)),
    )
    .service(
        web::resource("/posts/{id}")
            .route(web::get().to(posts::get_post))
            .route(web::put().to(posts::update_post))
            .route(web::delete().to(posts::delete_post))
            .default_service(web::to(not_found)),
    );
}

/// Catch-all for unmatched routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(MessageResponse::not_found())
}
