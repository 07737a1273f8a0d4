use api_types::health::HealthStatus;
use axum::Json;

pub async fn check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK".to_string(),
    })
}
