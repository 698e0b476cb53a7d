pub mod ask;
pub mod context;
pub mod delete;
pub mod history;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::qa::requests::{AskQuestionRequest, QaHistoryQuery};
use crate::services::AiService;
use crate::storage::Storage;

pub struct QaService {
    storage: Option<Arc<dyn Storage>>,
}

impl QaService {
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

    // 课程问答
    pub async fn ask_question(
        &self,
        request: &HttpRequest,
        ask_request: AskQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        ask::ask_question(self, request, ask_request).await
    }

    // 本人问答历史
    pub async fn get_history(
        &self,
        request: &HttpRequest,
        query: QaHistoryQuery,
    ) -> ActixResult<HttpResponse> {
        history::get_user_history(self, request, query).await
    }

    // 课程全部问答（教师）
    pub async fn get_course_history(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        history::get_course_history(self, request, course_id).await
    }

    // 删除本人问答记录
    pub async fn delete_record(
        &self,
        request: &HttpRequest,
        record_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_record(self, request, record_id).await
    }
}
