//! 学生答案实体
//!
//! (attempt_id, question_id) 由唯一索引保证一题一答，创建后不再修改。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub attempt_id: i64,
    pub question_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub student_answer: Option<String>,
    pub is_correct: bool,
    pub points_earned: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub ai_feedback: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quiz_attempts::Entity",
        from = "Column::AttemptId",
        to = "super::quiz_attempts::Column::Id"
    )]
    Attempt,
    #[sea_orm(
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id"
    )]
    Question,
}

impl Related<super::quiz_attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attempt.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_answer(self) -> crate::models::quizzes::entities::Answer {
        use crate::models::quizzes::entities::Answer;

        Answer {
            id: self.id,
            attempt_id: self.attempt_id,
            question_id: self.question_id,
            student_answer: self.student_answer,
            is_correct: self.is_correct,
            points_earned: self.points_earned,
            ai_feedback: self.ai_feedback,
        }
    }
}
