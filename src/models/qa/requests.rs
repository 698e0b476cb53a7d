use serde::{Deserialize, Serialize};

// 课程问答请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskQuestionRequest {
    pub course_id: i64,
    pub question: String,
}

// 历史查询参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaHistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i64>,
}
