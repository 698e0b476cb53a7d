use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::QuizService;
use crate::middlewares::RequireJWT;
use crate::models::quizzes::responses::QuizListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::permissions::ensure_course_access;

pub async fn list_course_quizzes(
    service: &QuizService,
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

    match storage.list_course_quizzes(course_id).await {
        Ok(quizzes) => {
            let total = quizzes.len();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                QuizListResponse { quizzes, total },
                "Quizzes retrieved successfully",
            )))
        }
        Err(e) => {
            error!("Failed to list quizzes for course {}: {}", course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve quizzes",
                )),
            )
        }
    }
}
