use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::QuizService;
use crate::middlewares::RequireJWT;
use crate::models::quizzes::entities::QuizAttempt;
use crate::models::quizzes::responses::{QuizDetailResponse, QuizWithQuestionsResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::permissions::ensure_course_access;

// 教师看到答案与解析，学生在完成一次尝试前只看到脱敏题目
pub async fn get_quiz(
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

    // 学生完成过一次尝试后即可查看答案与解析
    let reveal_answers = if user.is_teacher() {
        true
    } else {
        match storage
            .list_student_attempts(user.id, Some(quiz.course_id))
            .await
        {
            Ok(attempts) => has_completed_attempt(&attempts, quiz_id),
            Err(e) => {
                error!("Failed to list attempts for quiz {}: {}", quiz_id, e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Failed to retrieve quiz attempts",
                    )),
                );
            }
        }
    };

    if reveal_answers {
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuizWithQuestionsResponse { quiz, questions },
            "Quiz retrieved successfully",
        )))
    } else {
        let questions = questions
            .into_iter()
            .map(|q| q.into_student_view())
            .collect();
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuizDetailResponse { quiz, questions },
            "Quiz retrieved successfully",
        )))
    }
}

// 是否存在该测验的已完成尝试
pub fn has_completed_attempt(attempts: &[QuizAttempt], quiz_id: i64) -> bool {
    attempts
        .iter()
        .any(|a| a.quiz_id == quiz_id && a.is_completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn attempt(quiz_id: i64, is_completed: bool) -> QuizAttempt {
        QuizAttempt {
            id: 1,
            quiz_id,
            student_id: 7,
            score: is_completed.then_some(20.0),
            total_points: 40.0,
            is_completed,
            started_at: Utc::now(),
            submitted_at: is_completed.then(Utc::now),
        }
    }

    #[test]
    fn completed_attempt_unlocks_answers() {
        assert!(has_completed_attempt(&[attempt(5, true)], 5));
    }

    #[test]
    fn unfinished_attempt_keeps_answers_hidden() {
        assert!(!has_completed_attempt(&[attempt(5, false)], 5));
    }

    #[test]
    fn completed_attempt_of_another_quiz_does_not_count() {
        assert!(!has_completed_attempt(&[attempt(6, true)], 5));
        assert!(!has_completed_attempt(&[], 5));
    }
}
