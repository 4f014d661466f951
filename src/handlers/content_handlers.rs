use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::auth::session::require_admin;
use crate::errors::AppError;
use crate::models::content::{PageView, default_document, merge_over_defaults};
use crate::store::ContentStore;

/// GET /api/content - Full document. Never fails; defaults stand in for
/// anything unreadable.
pub async fn get(store: web::Data<dyn ContentStore>) -> HttpResponse {
    HttpResponse::Ok().json(store.load())
}

/// GET /api/page - Enabled modules in render order with typed data.
pub async fn page(store: web::Data<dyn ContentStore>) -> HttpResponse {
    let doc = store.load();
    HttpResponse::Ok().json(PageView::from_document(&doc))
}

/// POST /api/content - Replace the whole document (admin).
///
/// Module `data` is stored exactly as sent. Parts of the body that do not
/// fit the document shape fall back to defaults, as on load.
pub async fn save(
    store: web::Data<dyn ContentStore>,
    session: Session,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;

    if !body.is_object() {
        return Err(AppError::BadRequest("Content must be a JSON object".to_string()));
    }
    let doc = merge_over_defaults(&body, default_document());

    store.save(&doc).map_err(AppError::store("save content"))?;
    log::info!("Content saved ({} modules)", doc.modules.len());

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}
