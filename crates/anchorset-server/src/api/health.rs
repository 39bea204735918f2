//! Liveness and store health

use actix_web::{HttpResponse, get, http::StatusCode, web};
use serde::Serialize;

use crate::model::{AppState, response::json_response};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    /// Store dialect, or `none` when serving bundled defaults
    pub store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[get("/health")]
pub async fn health(data: web::Data<AppState>) -> HttpResponse {
    let Some(store) = data.store() else {
        return json_response(
            StatusCode::OK,
            HealthStatus {
                status: "UP",
                store: "none".to_string(),
                error: None,
            },
        );
    };

    let backend = store.storage_backend().to_string();
    match store.health_check().await {
        Ok(()) => json_response(
            StatusCode::OK,
            HealthStatus {
                status: "UP",
                store: backend,
                error: None,
            },
        ),
        Err(e) => {
            tracing::warn!(store = %backend, error = %e, "Store health check failed");
            json_response(
                StatusCode::SERVICE_UNAVAILABLE,
                HealthStatus {
                    status: "DOWN",
                    store: backend,
                    error: Some(e.to_string()),
                },
            )
        }
    }
}
