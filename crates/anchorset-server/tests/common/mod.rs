//! Shared fixtures for HTTP tests

use std::sync::Arc;

use actix_web::http::header;
use base64::{Engine, engine::general_purpose::STANDARD};
use config::Config;

use anchorset_persistence::sea_orm::{ConnectOptions, Database};
use anchorset_persistence::{CalculatorPersistence, SqlPersistService, bootstrap_schema};
use anchorset_server::model::{AppState, Configuration};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "s3cret";

/// Fresh in-memory SQLite store with the schema created
pub async fn sqlite_store() -> Arc<dyn CalculatorPersistence> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("Failed to open in-memory SQLite");
    bootstrap_schema(&db)
        .await
        .expect("Schema bootstrap failed");
    Arc::new(SqlPersistService::new(db))
}

pub fn configuration(overrides: &[(&str, &str)]) -> Configuration {
    let mut builder = Config::builder();
    for (key, value) in overrides {
        builder = builder.set_override(*key, *value).unwrap();
    }
    Configuration::from_config(builder.build().unwrap())
}

/// Admin API without credentials
pub fn open_state(store: Option<Arc<dyn CalculatorPersistence>>) -> AppState {
    AppState::new(configuration(&[]), store)
}

/// Admin API guarded by `ADMIN_USER` / `ADMIN_PASSWORD`
pub fn secured_state(store: Option<Arc<dyn CalculatorPersistence>>) -> AppState {
    AppState::new(
        configuration(&[
            ("admin.username", ADMIN_USER),
            ("admin.password", ADMIN_PASSWORD),
        ]),
        store,
    )
}

pub fn basic_auth(username: &str, password: &str) -> (header::HeaderName, String) {
    (
        header::AUTHORIZATION,
        format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password))),
    )
}

pub const BOUNDARY: &str = "----anchorset-test-boundary";

/// multipart/form-data body from text fields and an optional file part
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((content_type, data)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"art.png\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> (header::HeaderName, String) {
    (
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={}", BOUNDARY),
    )
}
