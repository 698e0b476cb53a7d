use serde::{Deserialize, Serialize};

use super::entities::QuestionType;

// 创建测验请求，questions 为空时由服务端按知识点生成模板题
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuizRequest {
    pub course_id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<i32>,
    #[serde(default)]
    pub questions: Vec<CreateQuestionRequest>,
}

// 创建题目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestionRequest {
    pub question_type: QuestionType,
    pub question_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
}

// AI 出题预览请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewQuizRequest {
    pub course_id: i64,
    pub knowledge_point: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_count: Option<u32>,
}

// 提交单题答案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_id: i64,
    pub answer: String,
}

// 学生查询自己的尝试列表，可按课程过滤
#[derive(Debug, Clone, Deserialize)]
pub struct AttemptListQuery {
    #[serde(default)]
    pub course_id: Option<i64>,
}
