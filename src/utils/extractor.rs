//! 路径参数安全提取器
//!
//! 将 {xxx_id} 解析为 i64，解析失败时直接返回 400，避免每个路由重复校验。

/// 定义一个从路径中提取指定名称 i64 参数的提取器
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let result = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0)
                    .map($name)
                    .ok_or_else(|| {
                        actix_web::error::ErrorBadRequest(format!("Invalid {} parameter", $param))
                    });
                std::future::ready(result)
            }
        }
    };
}

define_safe_i64_extractor!(SafeCourseIdI64, "course_id");
define_safe_i64_extractor!(SafeDocumentIdI64, "document_id");
define_safe_i64_extractor!(SafeRecordIdI64, "record_id");
define_safe_i64_extractor!(SafeQuizIdI64, "quiz_id");
define_safe_i64_extractor!(SafeAttemptIdI64, "attempt_id");
