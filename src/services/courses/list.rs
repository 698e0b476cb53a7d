use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::middlewares::RequireJWT;
use crate::models::courses::responses::CourseListResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

// 教师看到自己创建的课程，学生看到已选的课程
pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
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

    let result = match user.role {
        UserRole::Teacher => storage.list_teacher_courses(user.id).await,
        UserRole::Student => storage.list_student_courses(user.id).await,
    };

    match result {
        Ok(courses) => {
            let total = courses.len();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                CourseListResponse { courses, total },
                "Courses retrieved successfully",
            )))
        }
        Err(e) => {
            error!("Failed to list courses for user {}: {}", user.id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve courses",
                )),
            )
        }
    }
}
