use axum::{extract::State, Json};
use registry::AppRegistry;

use crate::model::health::HealthResponse;

pub async fn health_check(State(registry): State<AppRegistry>) -> Json<HealthResponse> {
    let db_connected = registry.health_check_repository().check_db().await;
    Json(HealthResponse {
        status: "ok",
        db_connected,
    })
}
