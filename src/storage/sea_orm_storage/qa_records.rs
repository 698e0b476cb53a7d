//! 问答记录存储操作

use super::SeaOrmStorage;
use crate::entity::qa_records::{ActiveModel, Column, Entity as QaRecords};
use crate::errors::{CourseSystemError, Result};
use crate::models::qa::entities::QaRecord;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 保存一次问答
    pub async fn create_qa_record_impl(
        &self,
        user_id: i64,
        course_id: i64,
        question: &str,
        answer: &str,
        context: Option<&str>,
    ) -> Result<QaRecord> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course_id),
            question: Set(question.to_string()),
            answer: Set(answer.to_string()),
            context: Set(context.map(|s| s.to_string())),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            CourseSystemError::database_operation(format!("保存问答记录失败: {e}"))
        })?;

        Ok(result.into_qa_record())
    }

    /// 列出用户的问答历史，可按课程过滤，按时间倒序
    pub async fn list_user_qa_records_impl(
        &self,
        user_id: i64,
        course_id: Option<i64>,
    ) -> Result<Vec<QaRecord>> {
        let mut select = QaRecords::find().filter(Column::UserId.eq(user_id));

        if let Some(course_id) = course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let records = select
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询问答历史失败: {e}"))
            })?;

        Ok(records.into_iter().map(|m| m.into_qa_record()).collect())
    }

    /// 列出课程内全部问答（教师视角）
    pub async fn list_course_qa_records_impl(&self, course_id: i64) -> Result<Vec<QaRecord>> {
        let records = QaRecords::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询课程问答失败: {e}"))
            })?;

        Ok(records.into_iter().map(|m| m.into_qa_record()).collect())
    }

    /// 通过 ID 获取问答记录
    pub async fn get_qa_record_by_id_impl(&self, record_id: i64) -> Result<Option<QaRecord>> {
        let result = QaRecords::find_by_id(record_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询问答记录失败: {e}"))
            })?;

        Ok(result.map(|m| m.into_qa_record()))
    }

    /// 删除本人的问答记录，user_id 不匹配时不删除
    pub async fn delete_qa_record_impl(&self, record_id: i64, user_id: i64) -> Result<bool> {
        let result = QaRecords::delete_many()
            .filter(Column::Id.eq(record_id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("删除问答记录失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}
