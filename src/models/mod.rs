//! 业务模型定义
//!
//! 按领域拆分子模块，公共响应结构与错误码在本文件导出。

pub mod auth;
pub mod common;
pub mod courses;
pub mod documents;
pub mod qa;
pub mod quizzes;
pub mod users;

pub use common::response::ApiResponse;

use std::time::SystemTime;

// 业务错误码，序列化进 ApiResponse.code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2001,
    RegisterFailed = 2002,
    UserAlreadyExists = 2003,
    UserNameInvalid = 2004,
    UserEmailInvalid = 2005,
    UserPasswordInvalid = 2006,
    UserNotFound = 2007,

    // 课程
    CourseNotFound = 3001,
    CoursePermissionDenied = 3002,
    CourseAlreadyEnrolled = 3003,
    CourseCreateFailed = 3004,
    CourseDeleteFailed = 3005,

    // 文档
    DocumentNotFound = 4001,
    FileTypeNotAllowed = 4002,
    FileSizeExceeded = 4003,
    FileUploadFailed = 4004,
    MultifileUploadNotAllowed = 4005,

    // 问答
    QaRecordNotFound = 5001,

    // 测验
    QuizNotFound = 6001,
    QuestionNotFound = 6002,
    AttemptNotFound = 6003,
    QuizCreateFailed = 6004,
    AnswerAlreadySubmitted = 6005,
    AttemptAlreadyCompleted = 6006,
}

// 进程启动时间，用于 /health 的 uptime 统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_time: SystemTime,
}
