use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use ts_rs::TS;

use crate::models::{ApiResponse, AppStartTime};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct HealthResponse {
    pub version: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub uptime_seconds: i64,
}

// 健康检查，无需认证
pub async fn health(start_time: web::Data<AppStartTime>) -> ActixResult<HttpResponse> {
    let now = chrono::Utc::now();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        HealthResponse {
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: start_time.start_datetime,
            uptime_seconds: now
                .signed_duration_since(start_time.start_datetime)
                .num_seconds(),
        },
        "Service is healthy",
    )))
}

pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/system").route("/health", web::get().to(health)));
}
