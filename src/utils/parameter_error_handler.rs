//! 请求参数反序列化错误的统一处理
//!
//! 保证 JSON/Query 解析失败时也返回 ApiResponse 结构，而不是 actix 默认的纯文本。

use actix_web::{HttpRequest, HttpResponse, error::Error};

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("请求体解析失败: {err}");
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

pub fn query_error_handler(err: actix_web::error::QueryPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("查询参数解析失败: {err}");
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}
