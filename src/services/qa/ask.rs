use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::QaService;
use super::context::{CONTEXT_SNAPSHOT_CHARS, build_context, truncate_chars};
use crate::middlewares::RequireJWT;
use crate::models::qa::{requests::AskQuestionRequest, responses::AskQuestionResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::permissions::ensure_course_access;

/// 上下文最大字符数
const CONTEXT_MAX_CHARS: usize = 2000;

pub async fn ask_question(
    service: &QaService,
    request: &HttpRequest,
    ask_request: AskQuestionRequest,
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

    if ask_request.question.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Question must not be empty",
        )));
    }

    // 选课/所有权校验
    if let Err(resp) = ensure_course_access(&storage, &user, ask_request.course_id).await {
        return Ok(resp);
    }

    // 1. 拼装课程资料上下文
    let documents = match storage.list_course_documents(ask_request.course_id).await {
        Ok(documents) => documents,
        Err(e) => {
            error!("Failed to load documents for context: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to load course documents",
                )),
            );
        }
    };
    let context = build_context(&ask_request.question, &documents, CONTEXT_MAX_CHARS);

    // 2. 调用 AI 回答（软失败，错误说明也会作为答案返回）
    let answer = ai.answer_question(&ask_request.question, &context).await;

    // 3. 保存问答记录，上下文只保留快照
    let snapshot = truncate_chars(&context, CONTEXT_SNAPSHOT_CHARS);
    match storage
        .create_qa_record(
            user.id,
            ask_request.course_id,
            &ask_request.question,
            &answer,
            Some(&snapshot),
        )
        .await
    {
        Ok(record) => {
            info!(
                "QA record {} created for user {} in course {}",
                record.id, user.id, ask_request.course_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AskQuestionResponse { record },
                "Question answered successfully",
            )))
        }
        Err(e) => {
            error!("Failed to save QA record: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to save QA record",
                )),
            )
        }
    }
}
