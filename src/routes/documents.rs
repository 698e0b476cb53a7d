use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::DocumentService;
use crate::utils::{SafeCourseIdI64, SafeDocumentIdI64};

// 懒加载的全局 DocumentService 实例
static DOCUMENT_SERVICE: Lazy<DocumentService> = Lazy::new(DocumentService::new_lazy);

pub async fn upload_document(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .upload_document(&req, course_id.0, payload)
        .await
}

pub async fn list_documents(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.list_documents(&req, course_id.0).await
}

pub async fn delete_document(
    req: HttpRequest,
    document_id: SafeDocumentIdI64,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.delete_document(&req, document_id.0).await
}

// 配置路由
pub fn configure_documents_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/documents")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 课程成员可浏览资料列表
                    .route(web::get().to(list_documents))
                    .route(
                        web::post()
                            .to(upload_document)
                            // 仅课程所有者可上传
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                            .wrap(middlewares::RateLimit::file_upload()),
                    ),
            ),
    );
    cfg.service(
        web::scope("/api/v1/documents")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{document_id}").route(
                    web::delete()
                        .to(delete_document)
                        // 仅课程所有者可删除，业务层校验归属
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            ),
    );
}
