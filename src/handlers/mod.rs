pub mod auth_handlers;
pub mod content_handlers;
pub mod rsvp_handlers;
pub mod upload_handlers;

use actix_web::web;

use crate::auth::middleware::require_json_content_type;
use crate::models::upload::MAX_UPLOAD_BYTES;

/// Configure the JSON API. Shared app data (store, credentials, limiter,
/// upload settings) is registered by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Raw image body, so it sits outside the JSON-only scope
    cfg.service(
        web::resource("/api/upload")
            .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
            .route(web::post().to(upload_handlers::upload)),
    );
    cfg.service(
        web::scope("/api")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .app_data(web::JsonConfig::default().limit(MAX_UPLOAD_BYTES))
            .route("/content", web::get().to(content_handlers::get))
            .route("/content", web::post().to(content_handlers::save))
            .route("/page", web::get().to(content_handlers::page))
            // /rsvp/export.csv BEFORE /rsvp/{id}
            .route("/rsvp", web::get().to(rsvp_handlers::list))
            .route("/rsvp", web::post().to(rsvp_handlers::submit))
            .route("/rsvp/export.csv", web::get().to(rsvp_handlers::export_csv))
            .route("/rsvp/{id}", web::delete().to(rsvp_handlers::delete))
            .route("/admin/login", web::post().to(auth_handlers::login))
            .route("/admin/logout", web::post().to(auth_handlers::logout))
            .route("/admin/session", web::get().to(auth_handlers::status)),
    );
}
