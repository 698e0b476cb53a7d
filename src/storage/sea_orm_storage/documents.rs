//! 课程资料存储操作

use super::SeaOrmStorage;
use crate::entity::documents::{ActiveModel, Column, Entity as Documents};
use crate::errors::{CourseSystemError, Result};
use crate::models::documents::entities::Document;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 保存上传的文档及抽取文本
    pub async fn create_document_impl(
        &self,
        course_id: i64,
        filename: &str,
        filepath: &str,
        file_type: Option<&str>,
        content: Option<&str>,
    ) -> Result<Document> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            filename: Set(filename.to_string()),
            filepath: Set(filepath.to_string()),
            file_type: Set(file_type.map(|s| s.to_string())),
            content: Set(content.map(|s| s.to_string())),
            uploaded_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("保存文档失败: {e}")))?;

        Ok(result.into_document())
    }

    /// 列出课程资料，按上传时间倒序
    pub async fn list_course_documents_impl(&self, course_id: i64) -> Result<Vec<Document>> {
        let documents = Documents::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::UploadedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询文档列表失败: {e}"))
            })?;

        Ok(documents.into_iter().map(|m| m.into_document()).collect())
    }

    /// 通过 ID 获取文档
    pub async fn get_document_by_id_impl(&self, document_id: i64) -> Result<Option<Document>> {
        let result = Documents::find_by_id(document_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询文档失败: {e}")))?;

        Ok(result.map(|m| m.into_document()))
    }

    /// 删除文档
    pub async fn delete_document_impl(&self, document_id: i64) -> Result<bool> {
        let result = Documents::delete_by_id(document_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("删除文档失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
