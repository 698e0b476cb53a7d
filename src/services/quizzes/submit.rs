use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::QuizService;
use crate::middlewares::RequireJWT;
use crate::models::quizzes::entities::NewAnswer;
use crate::models::quizzes::requests::SubmitAnswerRequest;
use crate::models::quizzes::responses::SubmitAnswerResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 主观题得分达到题目分值的 60% 即视为正确
const SUBJECTIVE_PASS_RATIO: f64 = 0.6;

/// 客观题判分：去掉首尾空白后区分大小写比较
pub fn grade_objective(correct_answer: &str, student_answer: &str, points: f64) -> (bool, f64) {
    let is_correct = student_answer.trim() == correct_answer.trim();
    let points_earned = if is_correct { points } else { 0.0 };
    (is_correct, points_earned)
}

/// 主观题正确性判定，points_earned 为 AI 给出的 0-10 分原值
pub fn subjective_is_correct(points_earned: f64, question_points: f64) -> bool {
    points_earned >= question_points * SUBJECTIVE_PASS_RATIO
}

pub async fn submit_answer(
    service: &QuizService,
    request: &HttpRequest,
    attempt_id: i64,
    submit_request: SubmitAnswerRequest,
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

    if attempt.is_completed {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AttemptAlreadyCompleted,
            "Quiz attempt is already completed",
        )));
    }

    let question = match storage.get_question_by_id(submit_request.question_id).await {
        Ok(Some(question)) => question,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                "Question not found",
            )));
        }
        Err(e) => {
            error!(
                "Failed to get question {}: {}",
                submit_request.question_id, e
            );
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve question",
                )),
            );
        }
    };

    if question.quiz_id != attempt.quiz_id {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Question does not belong to this quiz",
        )));
    }

    // 同一题只能提交一次
    match storage
        .get_answer_by_attempt_and_question(attempt_id, question.id)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AnswerAlreadySubmitted,
                "Answer for this question has already been submitted",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check existing answer: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to check existing answer",
                )),
            );
        }
    }

    let (is_correct, points_earned, ai_feedback) = if question.question_type.is_objective() {
        let (is_correct, points_earned) = grade_objective(
            &question.correct_answer,
            &submit_request.answer,
            question.points,
        );
        (is_correct, points_earned, None)
    } else {
        let ai = service.get_ai(request);
        let result = ai
            .grade_answer(
                &question.question_text,
                &question.correct_answer,
                &submit_request.answer,
            )
            .await;
        let is_correct = subjective_is_correct(result.score, question.points);
        (is_correct, result.score, Some(result.feedback))
    };

    let new_answer = NewAnswer {
        attempt_id,
        question_id: question.id,
        student_answer: Some(submit_request.answer),
        is_correct,
        points_earned,
        ai_feedback,
    };

    match storage.create_answer(new_answer).await {
        Ok(answer) => {
            info!(
                "Answer {} recorded for attempt {} question {} ({} points)",
                answer.id, attempt_id, question.id, points_earned
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                SubmitAnswerResponse { answer },
                "Answer submitted successfully",
            )))
        }
        Err(e) => {
            error!("Failed to save answer: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to save answer",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objective_full_points_on_exact_match() {
        assert_eq!(grade_objective("选项A", "选项A", 10.0), (true, 10.0));
    }

    #[test]
    fn objective_trims_whitespace() {
        assert_eq!(grade_objective("选项A", "  选项A \n", 10.0), (true, 10.0));
        assert_eq!(grade_objective(" 正确 ", "正确", 10.0), (true, 10.0));
    }

    #[test]
    fn objective_is_case_sensitive() {
        assert_eq!(grade_objective("True", "true", 10.0), (false, 0.0));
    }

    #[test]
    fn objective_wrong_answer_earns_zero() {
        assert_eq!(grade_objective("选项A", "选项B", 10.0), (false, 0.0));
    }

    #[test]
    fn subjective_threshold_at_sixty_percent() {
        // 20 分的题，12 分及以上算正确
        assert!(subjective_is_correct(12.0, 20.0));
        assert!(!subjective_is_correct(11.9, 20.0));
        // AI 给 0-10 分原值，不按题目分值缩放
        assert!(subjective_is_correct(6.0, 10.0));
        assert!(!subjective_is_correct(5.0, 10.0));
    }
}
