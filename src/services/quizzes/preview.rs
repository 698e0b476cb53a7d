use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use tracing::{error, info, warn};

use super::QuizService;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::quizzes::entities::QuestionType;
use crate::models::quizzes::requests::{CreateQuestionRequest, PreviewQuizRequest};
use crate::models::quizzes::responses::PreviewQuizResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::permissions::ensure_course_ownership;
use crate::services::qa::context::build_context;

/// 出题上下文最大字符数
const PREVIEW_CONTEXT_MAX_CHARS: usize = 3000;

/// 单次生成的题目数量上限
const MAX_QUESTION_COUNT: u32 = 20;

// AI 回复中的单道题目，字段名以提示词约定为准
#[derive(Debug, Deserialize)]
struct GeneratedQuestion {
    #[serde(rename = "type")]
    question_type: String,
    question: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    correct_answer: String,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    points: Option<f64>,
}

pub async fn preview_quiz(
    service: &QuizService,
    request: &HttpRequest,
    preview_request: PreviewQuizRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let ai = service.get_ai(request);

    let user = match RequireJWT::extract_user(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user",
            )));
        }
    };

    if preview_request.knowledge_point.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Knowledge point must not be empty",
        )));
    }

    if let Err(resp) = ensure_course_ownership(&storage, &user, preview_request.course_id).await {
        return Ok(resp);
    }

    let count = preview_request
        .question_count
        .unwrap_or_else(|| AppConfig::get().quiz.question_count)
        .clamp(1, MAX_QUESTION_COUNT);

    let documents = match storage.list_course_documents(preview_request.course_id).await {
        Ok(documents) => documents,
        Err(e) => {
            error!("Failed to load documents for quiz preview: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to load course documents",
                )),
            );
        }
    };
    let context = build_context(
        &preview_request.knowledge_point,
        &documents,
        PREVIEW_CONTEXT_MAX_CHARS,
    );

    let raw = ai
        .generate_quiz_questions(&preview_request.knowledge_point, &context, count)
        .await;

    match parse_generated_questions(&raw) {
        Ok(questions) => {
            info!(
                "Generated {} preview questions for course {} (knowledge point: {})",
                questions.len(),
                preview_request.course_id,
                preview_request.knowledge_point
            );
            let total = questions.len();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                PreviewQuizResponse { questions, total },
                "Quiz questions generated successfully",
            )))
        }
        Err(e) => {
            warn!("Failed to parse AI quiz generation response: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "AI response could not be parsed as quiz questions",
                )),
            )
        }
    }
}

/// 解析 AI 返回的题目 JSON 数组，兼容 Markdown 代码块包裹
pub fn parse_generated_questions(raw: &str) -> Result<Vec<CreateQuestionRequest>, String> {
    let json = strip_code_fences(raw);

    let generated: Vec<GeneratedQuestion> =
        serde_json::from_str(json).map_err(|e| format!("invalid question JSON: {e}"))?;

    if generated.is_empty() {
        return Err("AI returned an empty question list".to_string());
    }

    generated
        .into_iter()
        .map(|q| {
            let question_type = q
                .question_type
                .parse::<QuestionType>()
                .map_err(|e| e.to_string())?;
            let points = q.points.or(Some(default_points(question_type)));
            Ok(CreateQuestionRequest {
                question_type,
                question_text: q.question,
                options: q.options,
                correct_answer: q.correct_answer,
                explanation: q.explanation,
                points,
            })
        })
        .collect()
}

fn default_points(question_type: QuestionType) -> f64 {
    match question_type {
        QuestionType::Choice | QuestionType::TrueFalse => 10.0,
        QuestionType::ShortAnswer => 20.0,
    }
}

// 去掉 ```json ... ``` 或 ``` ... ``` 包裹，返回中间的 JSON 文本
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = r#"[
        {"type": "choice", "question": "1+1=?", "options": ["1", "2"], "correct_answer": "2", "explanation": "基础算术"},
        {"type": "short_answer", "question": "简述所有权。", "correct_answer": "所有权是..."}
    ]"#;

    #[test]
    fn parses_plain_json_array() {
        let questions = parse_generated_questions(PLAIN).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question_type, QuestionType::Choice);
        assert_eq!(questions[0].points, Some(10.0));
        assert_eq!(questions[1].question_type, QuestionType::ShortAnswer);
        assert_eq!(questions[1].points, Some(20.0));
        assert!(questions[1].options.is_none());
    }

    #[test]
    fn parses_markdown_fenced_json() {
        let fenced = format!("```json\n{PLAIN}\n```");
        let questions = parse_generated_questions(&fenced).unwrap();
        assert_eq!(questions.len(), 2);

        let fenced_plain = format!("```\n{PLAIN}\n```");
        assert_eq!(parse_generated_questions(&fenced_plain).unwrap().len(), 2);
    }

    #[test]
    fn rejects_non_json_and_soft_fail_text() {
        assert!(parse_generated_questions("AI服务调用失败: timeout").is_err());
        assert!(parse_generated_questions("[]").is_err());
    }

    #[test]
    fn rejects_unknown_question_type() {
        let raw = r#"[{"type": "essay", "question": "x", "correct_answer": "y"}]"#;
        assert!(parse_generated_questions(raw).is_err());
    }

    #[test]
    fn keeps_explicit_points() {
        let raw = r#"[{"type": "choice", "question": "x", "correct_answer": "y", "points": 5.0}]"#;
        let questions = parse_generated_questions(raw).unwrap();
        assert_eq!(questions[0].points, Some(5.0));
    }
}
