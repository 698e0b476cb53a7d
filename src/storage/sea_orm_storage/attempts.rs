//! 测验尝试与答案存储操作

use super::SeaOrmStorage;
use crate::entity::answers::{
    ActiveModel as AnswerActiveModel, Column as AnswerColumn, Entity as Answers,
};
use crate::entity::quiz_attempts::{ActiveModel, Column, Entity as QuizAttempts};
use crate::entity::quizzes::Column as QuizColumn;
use crate::errors::{CourseSystemError, Result};
use crate::models::quizzes::entities::{Answer, NewAnswer, QuizAttempt};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 开始一次测验尝试
    pub async fn create_attempt_impl(
        &self,
        quiz_id: i64,
        student_id: i64,
        total_points: f64,
    ) -> Result<QuizAttempt> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            quiz_id: Set(quiz_id),
            student_id: Set(student_id),
            score: Set(None),
            total_points: Set(total_points),
            is_completed: Set(false),
            started_at: Set(now),
            submitted_at: Set(None),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            CourseSystemError::database_operation(format!("创建测验尝试失败: {e}"))
        })?;

        Ok(result.into_attempt())
    }

    /// 通过 ID 获取尝试
    pub async fn get_attempt_by_id_impl(&self, attempt_id: i64) -> Result<Option<QuizAttempt>> {
        let result = QuizAttempts::find_by_id(attempt_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询测验尝试失败: {e}"))
            })?;

        Ok(result.map(|m| m.into_attempt()))
    }

    /// 保存判分后的答案，(attempt_id, question_id) 唯一索引兜底重复提交
    pub async fn create_answer_impl(&self, answer: NewAnswer) -> Result<Answer> {
        let model = AnswerActiveModel {
            attempt_id: Set(answer.attempt_id),
            question_id: Set(answer.question_id),
            student_answer: Set(answer.student_answer),
            is_correct: Set(answer.is_correct),
            points_earned: Set(answer.points_earned),
            ai_feedback: Set(answer.ai_feedback),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("保存答案失败: {e}")))?;

        Ok(result.into_answer())
    }

    /// 查询某次尝试中某题的答案
    pub async fn get_answer_by_attempt_and_question_impl(
        &self,
        attempt_id: i64,
        question_id: i64,
    ) -> Result<Option<Answer>> {
        let result = Answers::find()
            .filter(AnswerColumn::AttemptId.eq(attempt_id))
            .filter(AnswerColumn::QuestionId.eq(question_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询答案失败: {e}")))?;

        Ok(result.map(|m| m.into_answer()))
    }

    /// 列出某次尝试的全部答案
    pub async fn list_attempt_answers_impl(&self, attempt_id: i64) -> Result<Vec<Answer>> {
        let answers = Answers::find()
            .filter(AnswerColumn::AttemptId.eq(attempt_id))
            .order_by_asc(AnswerColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询答案列表失败: {e}"))
            })?;

        Ok(answers.into_iter().map(|m| m.into_answer()).collect())
    }

    /// 完成尝试并写入总分
    pub async fn complete_attempt_impl(
        &self,
        attempt_id: i64,
        score: f64,
    ) -> Result<QuizAttempt> {
        let attempt = QuizAttempts::find_by_id(attempt_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询测验尝试失败: {e}"))
            })?
            .ok_or_else(|| {
                CourseSystemError::not_found(format!("测验尝试不存在: {attempt_id}"))
            })?;

        let now = chrono::Utc::now().timestamp();
        let mut model: ActiveModel = attempt.into();
        model.score = Set(Some(score));
        model.is_completed = Set(true);
        model.submitted_at = Set(Some(now));

        let result = model.update(&self.db).await.map_err(|e| {
            CourseSystemError::database_operation(format!("完成测验尝试失败: {e}"))
        })?;

        Ok(result.into_attempt())
    }

    /// 列出测验的已完成尝试（统计用）
    pub async fn list_completed_attempts_impl(&self, quiz_id: i64) -> Result<Vec<QuizAttempt>> {
        let attempts = QuizAttempts::find()
            .filter(Column::QuizId.eq(quiz_id))
            .filter(Column::IsCompleted.eq(true))
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询已完成尝试失败: {e}"))
            })?;

        Ok(attempts.into_iter().map(|m| m.into_attempt()).collect())
    }

    /// 列出学生的尝试，可按课程过滤（经由测验表连接）
    pub async fn list_student_attempts_impl(
        &self,
        student_id: i64,
        course_id: Option<i64>,
    ) -> Result<Vec<QuizAttempt>> {
        let mut select = QuizAttempts::find().filter(Column::StudentId.eq(student_id));

        if let Some(course_id) = course_id {
            select = select
                .inner_join(crate::entity::quizzes::Entity)
                .filter(QuizColumn::CourseId.eq(course_id));
        }

        let attempts = select
            .order_by_desc(Column::StartedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询学生尝试失败: {e}"))
            })?;

        Ok(attempts.into_iter().map(|m| m.into_attempt()).collect())
    }
}
