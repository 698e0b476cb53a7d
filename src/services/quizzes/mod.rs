pub mod attempts;
pub mod complete;
pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod preview;
pub mod start;
pub mod stats;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::quizzes::requests::{
    AttemptListQuery, CreateQuizRequest, PreviewQuizRequest, SubmitAnswerRequest,
};
use crate::services::AiService;
use crate::storage::Storage;

pub struct QuizService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuizService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_ai(&self, request: &HttpRequest) -> Arc<AiService> {
        request
            .app_data::<actix_web::web::Data<Arc<AiService>>>()
            .expect("AiService not found in app data")
            .get_ref()
            .clone()
    }

    // 创建测验（教师），题目为空时生成模板题
    pub async fn create_quiz(
        &self,
        request: &HttpRequest,
        create_request: CreateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_quiz(self, request, create_request).await
    }

    // AI 出题预览（教师），不落库
    pub async fn preview_quiz(
        &self,
        request: &HttpRequest,
        preview_request: PreviewQuizRequest,
    ) -> ActixResult<HttpResponse> {
        preview::preview_quiz(self, request, preview_request).await
    }

    // 课程测验列表
    pub async fn list_course_quizzes(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_course_quizzes(self, request, course_id).await
    }

    // 测验详情，学生视角隐藏答案
    pub async fn get_quiz(&self, request: &HttpRequest, quiz_id: i64) -> ActixResult<HttpResponse> {
        detail::get_quiz(self, request, quiz_id).await
    }

    // 学生开始测验
    pub async fn start_quiz(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        start::start_quiz(self, request, quiz_id).await
    }

    // 提交单题答案并判分
    pub async fn submit_answer(
        &self,
        request: &HttpRequest,
        attempt_id: i64,
        submit_request: SubmitAnswerRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_answer(self, request, attempt_id, submit_request).await
    }

    // 完成测验并计算总分，幂等
    pub async fn complete_quiz(
        &self,
        request: &HttpRequest,
        attempt_id: i64,
    ) -> ActixResult<HttpResponse> {
        complete::complete_quiz(self, request, attempt_id).await
    }

    // 测验统计（教师）
    pub async fn get_statistics(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        stats::get_statistics(self, request, quiz_id).await
    }

    // 删除测验（教师）
    pub async fn delete_quiz(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_quiz(self, request, quiz_id).await
    }

    // 学生自己的尝试列表
    pub async fn list_attempts(
        &self,
        request: &HttpRequest,
        query: AttemptListQuery,
    ) -> ActixResult<HttpResponse> {
        attempts::list_attempts(self, request, query).await
    }
}
