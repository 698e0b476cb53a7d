use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::DocumentService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::permissions::ensure_course_ownership;

pub async fn delete_document(
    service: &DocumentService,
    request: &HttpRequest,
    document_id: i64,
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

    let document = match storage.get_document_by_id(document_id).await {
        Ok(Some(document)) => document,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::DocumentNotFound,
                "Document not found",
            )));
        }
        Err(e) => {
            error!("Failed to get document {}: {}", document_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching document",
                )),
            );
        }
    };

    if let Err(resp) = ensure_course_ownership(&storage, &user, document.course_id).await {
        return Ok(resp);
    }

    match storage.delete_document(document_id).await {
        Ok(true) => {
            // 磁盘文件删除失败不影响记录删除结果
            if let Err(e) = std::fs::remove_file(&document.filepath) {
                warn!("Failed to remove file {}: {}", document.filepath, e);
            }
            info!("Document {} deleted by user {}", document_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Document deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DocumentNotFound,
            "Document not found",
        ))),
        Err(e) => {
            error!("Failed to delete document {}: {}", document_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to delete document",
                )),
            )
        }
    }
}
