use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::warn;

use super::SystemService;
use crate::models::system::responses::{AiHealthResponse, HealthResponse};
use crate::models::{ApiResponse, AppStartTime, ErrorCode};
use crate::services::common::ai_client_from_request;
use crate::try_respond;

/// 服务与数据库健康检查，数据库不可用时返回 503
pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = try_respond!(service.get_storage(request));

    let database = match storage.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Database health check failed: {e}");
            false
        }
    };

    let started_at = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|t| t.start_datetime)
        .unwrap_or_else(chrono::Utc::now);
    let uptime_seconds = (chrono::Utc::now() - started_at).num_seconds().max(0);

    let response = HealthResponse {
        status: if database { "healthy" } else { "degraded" }.to_string(),
        database,
        uptime_seconds,
        started_at,
    };

    if database {
        Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is healthy")))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error(
            ErrorCode::InternalServerError,
            response,
            "Database is unavailable",
        )))
    }
}

pub async fn ai_health(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let ai = try_respond!(ai_client_from_request(request));
    let base_url = ai.base_url().to_string();

    if ai.health().await {
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            AiHealthResponse {
                ai_service: "healthy".to_string(),
                base_url,
            },
            "AI service is healthy",
        )))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error(
            ErrorCode::AiServiceUnavailable,
            AiHealthResponse {
                ai_service: "unavailable".to_string(),
                base_url,
            },
            "AI service is unavailable",
        )))
    }
}
