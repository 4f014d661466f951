use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::Value;

use crate::auth::session::require_admin;
use crate::errors::AppError;
use crate::models::content::export::{rsvp_csv, rsvp_csv_filename};
use crate::models::content::{NewRsvp, RsvpSummary};
use crate::store::ContentStore;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RsvpListResponse {
    /// Entries exactly as stored.
    pub responses: Vec<Value>,
    pub summary: RsvpSummary,
}

/// POST /api/rsvp - Guest submission (public)
pub async fn submit(
    store: web::Data<dyn ContentStore>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let rsvp = NewRsvp::from_json(&body);
    let stored = store.append_rsvp(rsvp).map_err(AppError::store("save RSVP"))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "id": stored.id,
    })))
}

/// GET /api/rsvp - All responses with totals (admin)
pub async fn list(
    store: web::Data<dyn ContentStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;

    let doc = store.load();
    let summary = RsvpSummary::from_responses(&doc.rsvps());
    Ok(HttpResponse::Ok().json(RsvpListResponse {
        responses: doc.rsvp_responses,
        summary,
    }))
}

/// GET /api/rsvp/export.csv - Spreadsheet download (admin)
pub async fn export_csv(
    store: web::Data<dyn ContentStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;

    let doc = store.load();
    let filename = rsvp_csv_filename(chrono::Utc::now().date_naive());

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(rsvp_csv(&doc.rsvps())))
}

/// DELETE /api/rsvp/{id} - Remove one response (admin). Unknown ids succeed.
pub async fn delete(
    store: web::Data<dyn ContentStore>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;

    let id = path.into_inner();
    let deleted = store.delete_rsvp(&id).map_err(AppError::store("delete RSVP"))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "deleted": deleted,
    })))
}
