use std::sync::Arc;

use crate::models::{
    courses::{
        entities::{Course, Enrollment},
        requests::CreateCourseRequest,
    },
    documents::entities::Document,
    qa::entities::QaRecord,
    quizzes::{
        entities::{Answer, NewAnswer, Question, Quiz, QuizAttempt},
        requests::CreateQuizRequest,
    },
    users::entities::{CreateUserData, User},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, data: CreateUserData) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, teacher_id: i64, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 列出教师创建的课程
    async fn list_teacher_courses(&self, teacher_id: i64) -> Result<Vec<Course>>;
    // 列出学生已选的课程
    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<Course>>;
    // 删除课程（级联删除资料、问答和测验）
    async fn delete_course(&self, course_id: i64) -> Result<bool>;
    // 学生选课
    async fn enroll_student(&self, student_id: i64, course_id: i64) -> Result<Enrollment>;
    // 查询选课记录
    async fn get_enrollment(&self, student_id: i64, course_id: i64)
    -> Result<Option<Enrollment>>;

    /// 课程资料管理方法
    // 保存上传的文档及抽取文本
    async fn create_document(
        &self,
        course_id: i64,
        filename: &str,
        filepath: &str,
        file_type: Option<&str>,
        content: Option<&str>,
    ) -> Result<Document>;
    // 列出课程资料
    async fn list_course_documents(&self, course_id: i64) -> Result<Vec<Document>>;
    // 通过ID获取文档
    async fn get_document_by_id(&self, document_id: i64) -> Result<Option<Document>>;
    // 删除文档
    async fn delete_document(&self, document_id: i64) -> Result<bool>;

    /// 问答记录管理方法
    // 保存一次问答
    async fn create_qa_record(
        &self,
        user_id: i64,
        course_id: i64,
        question: &str,
        answer: &str,
        context: Option<&str>,
    ) -> Result<QaRecord>;
    // 列出用户的问答历史，可按课程过滤
    async fn list_user_qa_records(
        &self,
        user_id: i64,
        course_id: Option<i64>,
    ) -> Result<Vec<QaRecord>>;
    // 列出课程内全部问答（教师视角）
    async fn list_course_qa_records(&self, course_id: i64) -> Result<Vec<QaRecord>>;
    // 通过ID获取问答记录
    async fn get_qa_record_by_id(&self, record_id: i64) -> Result<Option<QaRecord>>;
    // 删除本人的问答记录，非本人记录返回 false
    async fn delete_qa_record(&self, record_id: i64, user_id: i64) -> Result<bool>;

    /// 测验管理方法
    // 在同一事务中创建测验及其题目
    async fn create_quiz_with_questions(
        &self,
        quiz: CreateQuizRequest,
    ) -> Result<(Quiz, Vec<Question>)>;
    // 通过ID获取测验
    async fn get_quiz_by_id(&self, quiz_id: i64) -> Result<Option<Quiz>>;
    // 列出课程的测验
    async fn list_course_quizzes(&self, course_id: i64) -> Result<Vec<Quiz>>;
    // 获取测验的全部题目
    async fn get_quiz_questions(&self, quiz_id: i64) -> Result<Vec<Question>>;
    // 通过ID获取题目
    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<Question>>;
    // 删除测验（级联删除题目、尝试和答案）
    async fn delete_quiz(&self, quiz_id: i64) -> Result<bool>;

    /// 测验作答方法
    // 开始一次测验尝试，total_points 为当前题目总分快照
    async fn create_attempt(
        &self,
        quiz_id: i64,
        student_id: i64,
        total_points: f64,
    ) -> Result<QuizAttempt>;
    // 通过ID获取尝试
    async fn get_attempt_by_id(&self, attempt_id: i64) -> Result<Option<QuizAttempt>>;
    // 保存判分后的答案
    async fn create_answer(&self, answer: NewAnswer) -> Result<Answer>;
    // 查询某次尝试中某题的答案
    async fn get_answer_by_attempt_and_question(
        &self,
        attempt_id: i64,
        question_id: i64,
    ) -> Result<Option<Answer>>;
    // 列出某次尝试的全部答案
    async fn list_attempt_answers(&self, attempt_id: i64) -> Result<Vec<Answer>>;
    // 完成尝试并写入总分
    async fn complete_attempt(&self, attempt_id: i64, score: f64) -> Result<QuizAttempt>;
    // 列出测验的已完成尝试（统计用）
    async fn list_completed_attempts(&self, quiz_id: i64) -> Result<Vec<QuizAttempt>>;
    // 列出学生的尝试，可按课程过滤
    async fn list_student_attempts(
        &self,
        student_id: i64,
        course_id: Option<i64>,
    ) -> Result<Vec<QuizAttempt>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
