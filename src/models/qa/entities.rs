use serde::{Deserialize, Serialize};

// 问答记录，context 为截断后的资料快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaRecord {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
