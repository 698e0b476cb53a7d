use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::qa::requests::{AskQuestionRequest, QaHistoryQuery};
use crate::services::QaService;
use crate::utils::{SafeCourseIdI64, SafeRecordIdI64};

// 懒加载的全局 QaService 实例
static QA_SERVICE: Lazy<QaService> = Lazy::new(QaService::new_lazy);

pub async fn ask_question(
    req: HttpRequest,
    ask_data: web::Json<AskQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QA_SERVICE.ask_question(&req, ask_data.into_inner()).await
}

pub async fn get_history(
    req: HttpRequest,
    query: web::Query<QaHistoryQuery>,
) -> ActixResult<HttpResponse> {
    QA_SERVICE.get_history(&req, query.into_inner()).await
}

pub async fn get_course_history(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    QA_SERVICE.get_course_history(&req, course_id.0).await
}

pub async fn delete_record(
    req: HttpRequest,
    record_id: SafeRecordIdI64,
) -> ActixResult<HttpResponse> {
    QA_SERVICE.delete_record(&req, record_id.0).await
}

// 配置路由
pub fn configure_qa_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/qa")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/ask").route(
                    web::post()
                        .to(ask_question)
                        // AI 接口开销大，限制调用频率
                        .wrap(middlewares::RateLimit::ask_question()),
                ),
            )
            .route("/history", web::get().to(get_history))
            .route("/{record_id}", web::delete().to(delete_record)),
    );
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/qa")
            .wrap(middlewares::RequireJWT)
            // 课程全部问答，业务层校验课程所有权
            .route("", web::get().to(get_course_history)),
    );
}
