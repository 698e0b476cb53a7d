use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::QuizService;
use crate::middlewares::RequireJWT;
use crate::models::quizzes::entities::Answer;
use crate::models::quizzes::responses::CompleteQuizResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 总分为已提交答案的得分之和，未作答的题按 0 分计
pub fn total_score(answers: &[Answer]) -> f64 {
    answers.iter().map(|a| a.points_earned).sum()
}

// 幂等：已完成的尝试直接原样返回
pub async fn complete_quiz(
    service: &QuizService,
    request: &HttpRequest,
    attempt_id: i64,
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

    let attempt = match storage.get_attempt_by_id(attempt_id).await {
        Ok(Some(attempt)) => attempt,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AttemptNotFound,
                "Quiz attempt not found",
            )));
        }
        Err(e) => {
            error!("Failed to get attempt {}: {}", attempt_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve quiz attempt",
                )),
            );
        }
    };

    if attempt.student_id != uid {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "This attempt belongs to another student",
        )));
    }

    let answers = match storage.list_attempt_answers(attempt_id).await {
        Ok(answers) => answers,
        Err(e) => {
            error!("Failed to list answers for attempt {}: {}", attempt_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve attempt answers",
                )),
            );
        }
    };

    if attempt.is_completed {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            CompleteQuizResponse { attempt, answers },
            "Quiz attempt already completed",
        )));
    }

    let score = total_score(&answers);

    match storage.complete_attempt(attempt_id, score).await {
        Ok(attempt) => {
            info!(
                "Attempt {} completed by student {} with score {}/{}",
                attempt_id, uid, score, attempt.total_points
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                CompleteQuizResponse { attempt, answers },
                "Quiz attempt completed",
            )))
        }
        Err(e) => {
            error!("Failed to complete attempt {}: {}", attempt_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to complete quiz attempt",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(points_earned: f64) -> Answer {
        Answer {
            id: 1,
            attempt_id: 1,
            question_id: 1,
            student_answer: Some("答案".to_string()),
            is_correct: points_earned > 0.0,
            points_earned,
            ai_feedback: None,
        }
    }

    #[test]
    fn score_sums_points_earned() {
        let answers = vec![answer(10.0), answer(0.0), answer(7.5)];
        assert_eq!(total_score(&answers), 17.5);
    }

    #[test]
    fn no_answers_means_zero_score() {
        assert_eq!(total_score(&[]), 0.0);
    }
}
