use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;

use crate::models::{ApiResponse, AppStartTime};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

// 存活探针，不鉴权
pub async fn health(start_time: web::Data<AppStartTime>) -> ActixResult<HttpResponse> {
    let uptime_seconds = start_time
        .start_time
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        HealthStatus {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds,
        },
        "Service is healthy",
    )))
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/system").route("/health", web::get().to(health)));
}
