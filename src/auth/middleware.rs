use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{
    Error, HttpResponse,
    cookie::Key,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
    middleware::Next,
};

/// CSRF guard for JSON mutation endpoints.
///
/// Rejects POST/PUT/DELETE requests that don't declare
/// `Content-Type: application/json`. A cross-origin form post cannot set that
/// header with cookies attached. DELETE requests without a body are allowed.
pub async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let is_mutation = method == Method::POST || method == Method::PUT || method == Method::DELETE;
    let bodyless_delete = method == Method::DELETE && content_type.is_empty();

    if is_mutation && !bodyless_delete && !content_type.starts_with("application/json") {
        let body = serde_json::json!({
            "error": "Content-Type must be application/json for mutation requests"
        });
        let response = HttpResponse::BadRequest().json(body);
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Cookie-backed session store carrying the admin flag.
pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(secure)
        .cookie_http_only(true)
        .build()
}
