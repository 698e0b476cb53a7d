use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::quizzes::requests::{
    AttemptListQuery, CreateQuizRequest, PreviewQuizRequest, SubmitAnswerRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::QuizService;
use crate::utils::{SafeAttemptIdI64, SafeCourseIdI64, SafeQuizIdI64};

// 懒加载的全局 QuizService 实例
static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);

// HTTP处理程序
pub async fn create_quiz(
    req: HttpRequest,
    quiz_data: web::Json<CreateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.create_quiz(&req, quiz_data.into_inner()).await
}

pub async fn preview_quiz(
    req: HttpRequest,
    preview_data: web::Json<PreviewQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .preview_quiz(&req, preview_data.into_inner())
        .await
}

pub async fn list_course_quizzes(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_course_quizzes(&req, course_id.0).await
}

pub async fn get_quiz(req: HttpRequest, quiz_id: SafeQuizIdI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_quiz(&req, quiz_id.0).await
}

pub async fn delete_quiz(req: HttpRequest, quiz_id: SafeQuizIdI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.delete_quiz(&req, quiz_id.0).await
}

pub async fn get_statistics(
    req: HttpRequest,
    quiz_id: SafeQuizIdI64,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_statistics(&req, quiz_id.0).await
}

pub async fn start_quiz(req: HttpRequest, quiz_id: SafeQuizIdI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.start_quiz(&req, quiz_id.0).await
}

pub async fn submit_answer(
    req: HttpRequest,
    attempt_id: SafeAttemptIdI64,
    answer_data: web::Json<SubmitAnswerRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .submit_answer(&req, attempt_id.0, answer_data.into_inner())
        .await
}

pub async fn complete_quiz(
    req: HttpRequest,
    attempt_id: SafeAttemptIdI64,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.complete_quiz(&req, attempt_id.0).await
}

pub async fn list_attempts(
    req: HttpRequest,
    query: web::Query<AttemptListQuery>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_attempts(&req, query.into_inner()).await
}

// 配置路由
pub fn configure_quizzes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/quizzes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_quiz)
                        // 仅教师可创建测验
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/preview").route(
                    web::post()
                        .to(preview_quiz)
                        // AI 出题预览，限制调用频率
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                        .wrap(middlewares::RateLimit::quiz_generation()),
                ),
            )
            .service(
                web::resource("/{quiz_id}")
                    // 课程成员可查看，学生视角隐藏答案
                    .route(web::get().to(get_quiz))
                    .route(
                        web::delete()
                            .to(delete_quiz)
                            // 仅课程所有者，业务层校验归属
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{quiz_id}/statistics").route(
                    web::get()
                        .to(get_statistics)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{quiz_id}/attempts").route(
                    web::post()
                        .to(start_quiz)
                        // 仅学生可作答
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            ),
    );
    cfg.service(
        web::scope("/api/v1/attempts")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::get()
                        .to(list_attempts)
                        // 学生查看本人的作答记录
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            .service(
                web::resource("/{attempt_id}/answers").route(
                    web::post()
                        .to(submit_answer)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            .service(
                web::resource("/{attempt_id}/complete").route(
                    web::post()
                        .to(complete_quiz)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            ),
    );
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/quizzes")
            .wrap(middlewares::RequireJWT)
            // 课程测验列表，业务层校验课程成员身份
            .route("", web::get().to(list_course_quizzes)),
    );
}
