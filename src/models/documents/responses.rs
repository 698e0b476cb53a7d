use serde::{Deserialize, Serialize};

use super::entities::Document;

// 上传成功响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadDocumentResponse {
    pub document: Document,
    pub content_length: usize,
}

// 文档列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<Document>,
    pub total: usize,
}
