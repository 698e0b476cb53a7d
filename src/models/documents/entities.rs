use serde::{Deserialize, Serialize};

// 课程资料文档，content 为抽取后的纯文本
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub course_id: i64,
    pub filename: String,
    #[serde(skip_serializing)]
    pub filepath: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing)]
    pub content: Option<String>,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
