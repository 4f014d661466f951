use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth::password::AdminCredentials;
use crate::auth::rate_limit::LoginRateLimiter;
use crate::auth::session::{end_admin_session, is_admin, start_admin_session};
use crate::errors::AppError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// POST /api/admin/login
pub async fn login(
    req: HttpRequest,
    session: Session,
    credentials: web::Data<AdminCredentials>,
    limiter: web::Data<LoginRateLimiter>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    // Rate-limit check BEFORE hashing
    let ip = req.peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or_else(|| std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        log::warn!("Admin login blocked for {ip}");
        return Err(AppError::TooManyAttempts);
    }

    if !credentials.verify(&body.password) {
        limiter.record_failure(ip);
        log::warn!("Failed admin login from {ip}");
        return Err(AppError::Unauthorized);
    }

    limiter.clear(ip);
    start_admin_session(&session)?;
    log::info!("Admin logged in from {ip}");

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

/// POST /api/admin/logout
pub async fn logout(session: Session) -> HttpResponse {
    end_admin_session(&session);
    HttpResponse::Ok().json(serde_json::json!({ "success": true }))
}

/// GET /api/admin/session
pub async fn status(session: Session) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "authenticated": is_admin(&session) }))
}
