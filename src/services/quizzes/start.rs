use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::QuizService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::permissions::ensure_course_access;

// total_points 在开始时快照，后续改题不影响已开始的尝试
pub async fn start_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
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

    let quiz = match storage.get_quiz_by_id(quiz_id).await {
        Ok(Some(quiz)) => quiz,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuizNotFound,
                "Quiz not found",
            )));
        }
        Err(e) => {
            error!("Failed to get quiz {}: {}", quiz_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve quiz",
                )),
            );
        }
    };

    if let Err(resp) = ensure_course_access(&storage, &user, quiz.course_id).await {
        return Ok(resp);
    }

    let questions = match storage.get_quiz_questions(quiz_id).await {
        Ok(questions) => questions,
        Err(e) => {
            error!("Failed to get questions for quiz {}: {}", quiz_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve quiz questions",
                )),
            );
        }
    };
    let total_points: f64 = questions.iter().map(|q| q.points).sum();

    match storage.create_attempt(quiz_id, user.id, total_points).await {
        Ok(attempt) => {
            info!(
                "Student {} started quiz {} (attempt {}, total points {})",
                user.id, quiz_id, attempt.id, total_points
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(attempt, "Quiz attempt started")))
        }
        Err(e) => {
            error!("Failed to create attempt for quiz {}: {}", quiz_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to start quiz attempt",
                )),
            )
        }
    }
}
