use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::QaService;
use crate::middlewares::RequireJWT;
use crate::models::qa::responses::DeleteRecordResponse;
use crate::models::{ApiResponse, ErrorCode};

// 只允许删除本人的记录，记录不存在或不属于本人时静默不操作
pub async fn delete_record(
    service: &QaService,
    request: &HttpRequest,
    record_id: i64,
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

    match storage.delete_qa_record(record_id, uid).await {
        Ok(deleted) => {
            if deleted {
                info!("QA record {} deleted by user {}", record_id, uid);
            }
            Ok(deletion_response(deleted))
        }
        Err(e) => {
            error!("Failed to delete QA record {}: {}", record_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to delete QA record",
                )),
            )
        }
    }
}

// 两种结果都按成功返回，由 deleted 字段区分
fn deletion_response(deleted: bool) -> HttpResponse {
    let message = if deleted {
        "QA record deleted"
    } else {
        "QA record not found or not owned, nothing deleted"
    };
    HttpResponse::Ok().json(ApiResponse::success(
        DeleteRecordResponse { deleted },
        message,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn missing_or_unowned_record_is_a_silent_no_op() {
        let resp = deletion_response(false);
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn deleted_record_returns_ok() {
        let resp = deletion_response(true);
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
