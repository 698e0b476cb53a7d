use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::QaService;
use crate::middlewares::RequireJWT;
use crate::models::qa::{requests::QaHistoryQuery, responses::QaHistoryResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::permissions::ensure_course_ownership;

// 本人问答历史，可按课程过滤
pub async fn get_user_history(
    service: &QaService,
    request: &HttpRequest,
    query: QaHistoryQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    match storage.list_user_qa_records(uid, query.course_id).await {
        Ok(records) => {
            let total = records.len();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                QaHistoryResponse { records, total },
                "QA history retrieved successfully",
            )))
        }
        Err(e) => {
            error!("Failed to list QA history for user {}: {}", uid, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve QA history",
                )),
            )
        }
    }
}

// 课程全部问答，仅课程所有者可见
pub async fn get_course_history(
    service: &QaService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match RequireJWT::extract_user(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user",
            )));
        }
    };

    if let Err(resp) = ensure_course_ownership(&storage, &user, course_id).await {
        return Ok(resp);
    }

    match storage.list_course_qa_records(course_id).await {
        Ok(records) => {
            let total = records.len();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                QaHistoryResponse { records, total },
                "Course QA history retrieved successfully",
            )))
        }
        Err(e) => {
            error!("Failed to list course QA history: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve course QA history",
                )),
            )
        }
    }
}
