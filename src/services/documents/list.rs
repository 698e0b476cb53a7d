use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::DocumentService;
use crate::middlewares::RequireJWT;
use crate::models::documents::responses::DocumentListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::permissions::ensure_course_access;

pub async fn list_documents(
    service: &DocumentService,
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

    if let Err(resp) = ensure_course_access(&storage, &user, course_id).await {
        return Ok(resp);
    }

    match storage.list_course_documents(course_id).await {
        Ok(documents) => {
            let total = documents.len();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                DocumentListResponse { documents, total },
                "Documents retrieved successfully",
            )))
        }
        Err(e) => {
            error!("Failed to list documents for course {}: {}", course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve documents",
                )),
            )
        }
    }
}
