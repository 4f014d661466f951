//! Shared test infrastructure.
//!
//! - `setup_file_store()` - `FileStore` in a fresh temp directory
//! - `TestState` / `build_app()` - the JSON API wired like `main`, backed
//!   by any `ContentStore`
//! - `login_request()` / `session_cookie()` - admin session for protected routes

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{
    App, Error,
    body::MessageBody,
    cookie::{Cookie, Key},
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    test, web,
};
use tempfile::TempDir;

use svadba::auth::{middleware::session_middleware, password::AdminCredentials, rate_limit::LoginRateLimiter};
use svadba::handlers::{self, upload_handlers::UploadSettings};
use svadba::models::upload::MAX_UPLOAD_BYTES;
use svadba::store::{ContentStore, FileStore};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ADMIN_PASS: &str = "fortuna";

// ============================================================================
// STORE SETUP
// ============================================================================

/// A `FileStore` rooted in a temp directory. Keep the `TempDir` alive for
/// as long as the store is used.
pub fn setup_file_store() -> (TempDir, FileStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path().join("data"));
    (dir, store)
}

// ============================================================================
// HTTP SETUP
// ============================================================================

pub struct TestState {
    pub store: web::Data<dyn ContentStore>,
    pub credentials: web::Data<AdminCredentials>,
    pub limiter: web::Data<LoginRateLimiter>,
    pub uploads: web::Data<UploadSettings>,
    pub images_dir: PathBuf,
    _dir: TempDir,
}

impl TestState {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let images_dir = dir.path().join("public").join("images");
        TestState {
            store: web::Data::from(store),
            credentials: web::Data::new(
                AdminCredentials::from_password(ADMIN_PASS).expect("Failed to hash password"),
            ),
            limiter: web::Data::new(LoginRateLimiter::new(5, Duration::from_secs(900))),
            uploads: web::Data::new(UploadSettings {
                images_dir: images_dir.clone(),
                max_bytes: MAX_UPLOAD_BYTES,
            }),
            images_dir,
            _dir: dir,
        }
    }
}

pub fn build_app(
    state: &TestState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .wrap(session_middleware(Key::generate(), false))
        .app_data(state.store.clone())
        .app_data(state.credentials.clone())
        .app_data(state.limiter.clone())
        .app_data(state.uploads.clone())
        .configure(handlers::configure)
}

/// Admin login request with the correct password.
pub fn login_request() -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(serde_json::json!({ "password": ADMIN_PASS }))
}

/// Session cookie set by a successful login.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    assert!(resp.status().is_success(), "login failed: {}", resp.status());
    resp.response()
        .cookies()
        .find(|c| c.name() == "id")
        .expect("session cookie")
        .into_owned()
}
