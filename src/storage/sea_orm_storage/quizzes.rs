//! 测验与题目存储操作

use super::SeaOrmStorage;
use crate::config::AppConfig;
use crate::entity::questions::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as Questions,
};
use crate::entity::quizzes::{ActiveModel, Column, Entity as Quizzes};
use crate::errors::{CourseSystemError, Result};
use crate::models::quizzes::{
    entities::{Question, QuestionType, Quiz},
    requests::CreateQuizRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 各题型的默认分值
fn default_points(question_type: QuestionType) -> f64 {
    match question_type {
        QuestionType::Choice | QuestionType::TrueFalse => 10.0,
        QuestionType::ShortAnswer => 20.0,
    }
}

impl SeaOrmStorage {
    /// 在同一事务中创建测验及其题目，任一题目写入失败则整体回滚
    pub async fn create_quiz_with_questions_impl(
        &self,
        req: CreateQuizRequest,
    ) -> Result<(Quiz, Vec<Question>)> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let quiz_model = ActiveModel {
            course_id: Set(req.course_id),
            title: Set(req.title),
            description: Set(req.description),
            knowledge_point: Set(req.knowledge_point),
            time_limit: Set(req
                .time_limit
                .unwrap_or_else(|| AppConfig::get().quiz.time_limit_minutes)),
            created_at: Set(now),
            ..Default::default()
        };

        let quiz = quiz_model
            .insert(&txn)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("创建测验失败: {e}")))?;

        let mut questions = Vec::with_capacity(req.questions.len());
        for q in req.questions {
            let options_json = match &q.options {
                Some(options) => Some(serde_json::to_string(options)?),
                None => None,
            };

            let question_model = QuestionActiveModel {
                quiz_id: Set(quiz.id),
                question_type: Set(q.question_type.to_string()),
                question_text: Set(q.question_text),
                options: Set(options_json),
                correct_answer: Set(q.correct_answer),
                explanation: Set(q.explanation),
                points: Set(q.points.unwrap_or_else(|| default_points(q.question_type))),
                ..Default::default()
            };

            let question = question_model.insert(&txn).await.map_err(|e| {
                CourseSystemError::database_operation(format!("创建题目失败: {e}"))
            })?;

            questions.push(question.into_question());
        }

        txn.commit()
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((quiz.into_quiz(), questions))
    }

    /// 通过 ID 获取测验
    pub async fn get_quiz_by_id_impl(&self, quiz_id: i64) -> Result<Option<Quiz>> {
        let result = Quizzes::find_by_id(quiz_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询测验失败: {e}")))?;

        Ok(result.map(|m| m.into_quiz()))
    }

    /// 列出课程的测验，按创建时间倒序
    pub async fn list_course_quizzes_impl(&self, course_id: i64) -> Result<Vec<Quiz>> {
        let quizzes = Quizzes::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询测验列表失败: {e}"))
            })?;

        Ok(quizzes.into_iter().map(|m| m.into_quiz()).collect())
    }

    /// 获取测验的全部题目，按 ID 升序保持出题顺序
    pub async fn get_quiz_questions_impl(&self, quiz_id: i64) -> Result<Vec<Question>> {
        let questions = Questions::find()
            .filter(QuestionColumn::QuizId.eq(quiz_id))
            .order_by_asc(QuestionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询题目列表失败: {e}"))
            })?;

        Ok(questions.into_iter().map(|m| m.into_question()).collect())
    }

    /// 通过 ID 获取题目
    pub async fn get_question_by_id_impl(&self, question_id: i64) -> Result<Option<Question>> {
        let result = Questions::find_by_id(question_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.into_question()))
    }

    /// 删除测验
    pub async fn delete_quiz_impl(&self, quiz_id: i64) -> Result<bool> {
        let result = Quizzes::delete_by_id(quiz_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("删除测验失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
