use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::QuizService;
use crate::middlewares::RequireJWT;
use crate::models::quizzes::entities::QuizAttempt;
use crate::models::quizzes::responses::QuizStatistics;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::permissions::ensure_course_ownership;

/// 对已完成的尝试做成绩统计，无数据时全部为 0
pub fn compute_statistics(attempts: &[QuizAttempt]) -> QuizStatistics {
    if attempts.is_empty() {
        return QuizStatistics {
            total_attempts: 0,
            average_score: 0.0,
            max_score: 0.0,
            min_score: 0.0,
        };
    }

    let scores: Vec<f64> = attempts.iter().map(|a| a.score.unwrap_or(0.0)).collect();
    let sum: f64 = scores.iter().sum();
    let max = scores.iter().cloned().fold(f64::MIN, f64::max);
    let min = scores.iter().cloned().fold(f64::MAX, f64::min);

    QuizStatistics {
        total_attempts: attempts.len() as u64,
        average_score: sum / scores.len() as f64,
        max_score: max,
        min_score: min,
    }
}

pub async fn get_statistics(
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

    if let Err(resp) = ensure_course_ownership(&storage, &user, quiz.course_id).await {
        return Ok(resp);
    }

    match storage.list_completed_attempts(quiz_id).await {
        Ok(attempts) => {
            let statistics = compute_statistics(&attempts);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                statistics,
                "Quiz statistics retrieved successfully",
            )))
        }
        Err(e) => {
            error!(
                "Failed to list completed attempts for quiz {}: {}",
                quiz_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve quiz statistics",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn completed_attempt(score: f64) -> QuizAttempt {
        QuizAttempt {
            id: 1,
            quiz_id: 1,
            student_id: 1,
            score: Some(score),
            total_points: 40.0,
            is_completed: true,
            started_at: Utc::now(),
            submitted_at: Some(Utc::now()),
        }
    }

    #[test]
    fn empty_attempts_yield_all_zero() {
        let stats = compute_statistics(&[]);
        assert_eq!(
            stats,
            QuizStatistics {
                total_attempts: 0,
                average_score: 0.0,
                max_score: 0.0,
                min_score: 0.0,
            }
        );
    }

    #[test]
    fn statistics_over_completed_attempts() {
        let attempts = vec![
            completed_attempt(40.0),
            completed_attempt(20.0),
            completed_attempt(30.0),
        ];
        let stats = compute_statistics(&attempts);
        assert_eq!(stats.total_attempts, 3);
        assert_eq!(stats.average_score, 30.0);
        assert_eq!(stats.max_score, 40.0);
        assert_eq!(stats.min_score, 20.0);
    }

    #[test]
    fn single_attempt_has_equal_bounds() {
        let stats = compute_statistics(&[completed_attempt(25.5)]);
        assert_eq!(stats.average_score, 25.5);
        assert_eq!(stats.max_score, 25.5);
        assert_eq!(stats.min_score, 25.5);
    }
}
