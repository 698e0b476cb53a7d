use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::QuizService;
use crate::middlewares::RequireJWT;
use crate::models::quizzes::entities::QuestionType;
use crate::models::quizzes::requests::{CreateQuestionRequest, CreateQuizRequest};
use crate::models::quizzes::responses::QuizWithQuestionsResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::permissions::ensure_course_ownership;

pub async fn create_quiz(
    service: &QuizService,
    request: &HttpRequest,
    mut create_request: CreateQuizRequest,
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

    if create_request.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Quiz title must not be empty",
        )));
    }

    if let Err(resp) = ensure_course_ownership(&storage, &user, create_request.course_id).await {
        return Ok(resp);
    }

    // 知识点缺省时用标题顶替，模板题和默认描述都以它为基础
    let knowledge_point = create_request
        .knowledge_point
        .clone()
        .unwrap_or_else(|| create_request.title.clone());

    if create_request.description.is_none() {
        create_request.description = Some(format!("关于{knowledge_point}的测验"));
    }

    if create_request.questions.is_empty() {
        create_request.questions = template_questions(&knowledge_point);
    }

    match storage.create_quiz_with_questions(create_request).await {
        Ok((quiz, questions)) => {
            info!(
                "Quiz {} created in course {} with {} questions by teacher {}",
                quiz.id,
                quiz.course_id,
                questions.len(),
                user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                QuizWithQuestionsResponse { quiz, questions },
                "Quiz created successfully",
            )))
        }
        Err(e) => {
            error!("Failed to create quiz: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::QuizCreateFailed,
                    "Failed to create quiz",
                )),
            )
        }
    }
}

/// 围绕知识点的三道模板题：选择 / 判断 / 简答
pub fn template_questions(knowledge_point: &str) -> Vec<CreateQuestionRequest> {
    vec![
        CreateQuestionRequest {
            question_type: QuestionType::Choice,
            question_text: format!("关于{knowledge_point}，以下哪个说法是正确的？"),
            options: Some(vec![
                "选项A".to_string(),
                "选项B".to_string(),
                "选项C".to_string(),
                "选项D".to_string(),
            ]),
            correct_answer: "选项A".to_string(),
            explanation: Some("这是正确答案的解释".to_string()),
            points: Some(10.0),
        },
        CreateQuestionRequest {
            question_type: QuestionType::TrueFalse,
            question_text: format!("{knowledge_point}是一个重要的概念。"),
            options: Some(vec!["正确".to_string(), "错误".to_string()]),
            correct_answer: "正确".to_string(),
            explanation: Some("这个说法是正确的".to_string()),
            points: Some(10.0),
        },
        CreateQuestionRequest {
            question_type: QuestionType::ShortAnswer,
            question_text: format!("请简述{knowledge_point}的主要内容。"),
            options: None,
            correct_answer: format!("{knowledge_point}的主要内容包括..."),
            explanation: Some("参考答案".to_string()),
            points: Some(20.0),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_covers_all_three_types() {
        let questions = template_questions("二叉树");
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].question_type, QuestionType::Choice);
        assert_eq!(questions[1].question_type, QuestionType::TrueFalse);
        assert_eq!(questions[2].question_type, QuestionType::ShortAnswer);
    }

    #[test]
    fn template_points_follow_type_defaults() {
        let questions = template_questions("排序");
        assert_eq!(questions[0].points, Some(10.0));
        assert_eq!(questions[1].points, Some(10.0));
        assert_eq!(questions[2].points, Some(20.0));
    }

    #[test]
    fn template_embeds_knowledge_point() {
        let questions = template_questions("动态规划");
        for q in &questions {
            assert!(q.question_text.contains("动态规划"));
        }
        // 简答题没有选项
        assert!(questions[2].options.is_none());
    }
}
