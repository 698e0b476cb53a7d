//! 课程访问权限判定
//!
//! 教师只能管理自己创建的课程，学生只能访问已选课程。

use std::sync::Arc;

use actix_web::HttpResponse;

use crate::errors::Result;
use crate::models::courses::entities::Course;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 纯判定逻辑：角色 + 归属关系 -> 是否可访问
pub fn decide_course_access(
    role: UserRole,
    user_id: i64,
    course_teacher_id: i64,
    enrolled: bool,
) -> bool {
    match role {
        UserRole::Teacher => user_id == course_teacher_id,
        UserRole::Student => enrolled,
    }
}

/// 用户是否能访问课程（教师为课程所有者，学生需已选课）
pub async fn can_access_course(
    storage: &Arc<dyn Storage>,
    user: &User,
    course: &Course,
) -> Result<bool> {
    let enrolled = match user.role {
        UserRole::Student => storage.get_enrollment(user.id, course.id).await?.is_some(),
        UserRole::Teacher => false,
    };

    Ok(decide_course_access(
        user.role,
        user.id,
        course.teacher_id,
        enrolled,
    ))
}

/// 用户是否能管理课程（仅课程所有者）
pub fn can_manage_course(user: &User, course: &Course) -> bool {
    user.role == UserRole::Teacher && user.id == course.teacher_id
}

/// 课程访问校验，失败时返回现成的 403/404/500 响应
pub async fn ensure_course_access(
    storage: &Arc<dyn Storage>,
    user: &User,
    course_id: i64,
) -> std::result::Result<Course, HttpResponse> {
    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to get course {}: {}", course_id, e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching course",
                )),
            );
        }
    };

    match can_access_course(storage, user, &course).await {
        Ok(true) => Ok(course),
        Ok(false) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "You do not have access to this course",
        ))),
        Err(e) => {
            tracing::error!("Failed to check course access: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while checking course access",
                )),
            )
        }
    }
}

/// 课程管理权限校验（仅课程所有者），失败时返回现成的响应
pub async fn ensure_course_ownership(
    storage: &Arc<dyn Storage>,
    user: &User,
    course_id: i64,
) -> std::result::Result<Course, HttpResponse> {
    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to get course {}: {}", course_id, e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching course",
                )),
            );
        }
    };

    if can_manage_course(user, &course) {
        Ok(course)
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "Only the course owner can perform this operation",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teacher_owns_course() {
        assert!(decide_course_access(UserRole::Teacher, 1, 1, false));
        assert!(!decide_course_access(UserRole::Teacher, 2, 1, false));
    }

    #[test]
    fn teacher_cannot_access_other_course_even_if_enrolled_flag_set() {
        // 教师身份不走选课通道
        assert!(!decide_course_access(UserRole::Teacher, 2, 1, true));
    }

    #[test]
    fn student_needs_enrollment() {
        assert!(decide_course_access(UserRole::Student, 3, 1, true));
        assert!(!decide_course_access(UserRole::Student, 3, 1, false));
    }

    #[test]
    fn student_id_match_does_not_grant_access() {
        // 学生即便 id 恰好等于 teacher_id 也必须已选课
        assert!(!decide_course_access(UserRole::Student, 1, 1, false));
    }
}
