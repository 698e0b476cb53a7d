use serde::{Deserialize, Serialize};

use super::entities::{Answer, Question, Quiz, QuizAttempt, StudentQuestion};
use super::requests::CreateQuestionRequest;

// 测验详情（学生视角题目）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizDetailResponse {
    pub quiz: Quiz,
    pub questions: Vec<StudentQuestion>,
}

// 测验详情（教师视角题目，含答案）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizWithQuestionsResponse {
    pub quiz: Quiz,
    pub questions: Vec<Question>,
}

// 测验列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizListResponse {
    pub quizzes: Vec<Quiz>,
    pub total: usize,
}

// AI 出题预览响应，题目未入库
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewQuizResponse {
    pub questions: Vec<CreateQuestionRequest>,
    pub total: usize,
}

// 单题提交响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub answer: Answer,
}

// 完成测验响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteQuizResponse {
    pub attempt: QuizAttempt,
    pub answers: Vec<Answer>,
}

// 成绩统计，无已完成尝试时全部为 0
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct QuizStatistics {
    pub total_attempts: u64,
    pub average_score: f64,
    pub max_score: f64,
    pub min_score: f64,
}

// 学生自己的尝试列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptListResponse {
    pub attempts: Vec<QuizAttempt>,
    pub total: usize,
}
