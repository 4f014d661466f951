use std::fs;
use std::path::PathBuf;

use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use rand::Rng;
use serde::Deserialize;

use crate::auth::session::require_admin;
use crate::errors::AppError;
use crate::models::upload::{image_url, stored_file_name, validate_upload};

/// Where uploads go and how large they may be.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub images_dir: PathBuf,
    pub max_bytes: usize,
}

#[derive(Deserialize)]
pub struct UploadQuery {
    /// Client-side file name; only its extension is used.
    pub name: Option<String>,
}

/// POST /api/upload?name=<file name> - Raw image body (admin).
/// Returns the public URL to put into module data.
pub async fn upload(
    req: HttpRequest,
    session: Session,
    settings: web::Data<UploadSettings>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;

    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let default_ext =
        validate_upload(content_type, body.len(), settings.max_bytes).map_err(AppError::BadRequest)?;

    let random: [u8; 6] = rand::rng().random();
    let file_name = stored_file_name(
        query.name.as_deref(),
        default_ext,
        chrono::Utc::now().timestamp_millis(),
        &hex::encode(random),
    );

    fs::create_dir_all(&settings.images_dir).map_err(AppError::Upload)?;
    fs::write(settings.images_dir.join(&file_name), &body).map_err(AppError::Upload)?;
    log::info!("Stored upload {file_name} ({} bytes)", body.len());

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "url": image_url(&file_name),
        "fileName": file_name,
    })))
}
