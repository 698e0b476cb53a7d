use serde::{Deserialize, Serialize};

use super::entities::QaRecord;

// 问答响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskQuestionResponse {
    pub record: QaRecord,
}

// 问答历史响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaHistoryResponse {
    pub records: Vec<QaRecord>,
    pub total: usize,
}

// 删除问答记录响应，记录不存在或不属于本人时 deleted 为 false
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRecordResponse {
    pub deleted: bool,
}
