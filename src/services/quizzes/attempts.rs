use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::QuizService;
use crate::middlewares::RequireJWT;
use crate::models::quizzes::requests::AttemptListQuery;
use crate::models::quizzes::responses::AttemptListResponse;
use crate::models::{ApiResponse, ErrorCode};

// 学生查看本人的尝试记录，按开始时间倒序，可按课程过滤
pub async fn list_attempts(
    service: &QuizService,
    request: &HttpRequest,
    query: AttemptListQuery,
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

    match storage.list_student_attempts(uid, query.course_id).await {
        Ok(attempts) => {
            let total = attempts.len();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AttemptListResponse { attempts, total },
                "Quiz attempts retrieved successfully",
            )))
        }
        Err(e) => {
            error!("Failed to list attempts for student {}: {}", uid, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve quiz attempts",
                )),
            )
        }
    }
}
