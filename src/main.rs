use std::sync::Arc;

use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use svadba::auth::{middleware::session_middleware, password::AdminCredentials, rate_limit::LoginRateLimiter};
use svadba::config::AppConfig;
use svadba::handlers::{self, upload_handlers::UploadSettings};
use svadba::models::upload::MAX_UPLOAD_BYTES;
use svadba::store::{ContentStore, FileStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();

    // Creates the data directory if it can; a read-only deployment still
    // serves the default content.
    let file_store = FileStore::new(&config.data_dir);
    log::info!("Content stored at {}", file_store.path().display());
    let store: Arc<dyn ContentStore> = Arc::new(file_store);
    let store = web::Data::from(store);

    let credentials = AdminCredentials::from_password(&config.admin_password)
        .map_err(std::io::Error::other)?;
    let credentials = web::Data::new(credentials);
    let limiter = web::Data::new(LoginRateLimiter::default());
    let uploads = web::Data::new(UploadSettings {
        images_dir: config.images_dir(),
        max_bytes: MAX_UPLOAD_BYTES,
    });

    let secret_key = match &config.session_key {
        Some(key) => Key::from(key.as_bytes()),
        None => Key::generate(),
    };

    let images_dir = config.images_dir();
    let public_dir = config.public_dir.clone();
    let secure_cookies = config.secure_cookies;

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(secret_key.clone(), secure_cookies))
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(credentials.clone())
            .app_data(limiter.clone())
            .app_data(uploads.clone())
            .configure(handlers::configure)
            // Uploaded images, then the front-end bundle (must be registered last)
            .service(actix_files::Files::new("/images", &images_dir))
            .service(actix_files::Files::new("/", &public_dir).index_file("index.html"))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
