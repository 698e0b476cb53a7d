//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod attempts;
mod courses;
mod documents;
mod qa_records;
mod quizzes;
mod users;

use crate::config::AppConfig;
use crate::errors::{CourseSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CourseSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CourseSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CourseSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CourseSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, data: CreateUserData) -> Result<User> {
        self.create_user_impl(data).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 课程模块
    async fn create_course(&self, teacher_id: i64, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(teacher_id, course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn list_teacher_courses(&self, teacher_id: i64) -> Result<Vec<Course>> {
        self.list_teacher_courses_impl(teacher_id).await
    }

    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<Course>> {
        self.list_student_courses_impl(student_id).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    async fn enroll_student(&self, student_id: i64, course_id: i64) -> Result<Enrollment> {
        self.enroll_student_impl(student_id, course_id).await
    }

    async fn get_enrollment(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(student_id, course_id).await
    }

    // 文档模块
    async fn create_document(
        &self,
        course_id: i64,
        filename: &str,
        filepath: &str,
        file_type: Option<&str>,
        content: Option<&str>,
    ) -> Result<Document> {
        self.create_document_impl(course_id, filename, filepath, file_type, content)
            .await
    }

    async fn list_course_documents(&self, course_id: i64) -> Result<Vec<Document>> {
        self.list_course_documents_impl(course_id).await
    }

    async fn get_document_by_id(&self, document_id: i64) -> Result<Option<Document>> {
        self.get_document_by_id_impl(document_id).await
    }

    async fn delete_document(&self, document_id: i64) -> Result<bool> {
        self.delete_document_impl(document_id).await
    }

    // 问答模块
    async fn create_qa_record(
        &self,
        user_id: i64,
        course_id: i64,
        question: &str,
        answer: &str,
        context: Option<&str>,
    ) -> Result<QaRecord> {
        self.create_qa_record_impl(user_id, course_id, question, answer, context)
            .await
    }

    async fn list_user_qa_records(
        &self,
        user_id: i64,
        course_id: Option<i64>,
    ) -> Result<Vec<QaRecord>> {
        self.list_user_qa_records_impl(user_id, course_id).await
    }

    async fn list_course_qa_records(&self, course_id: i64) -> Result<Vec<QaRecord>> {
        self.list_course_qa_records_impl(course_id).await
    }

    async fn get_qa_record_by_id(&self, record_id: i64) -> Result<Option<QaRecord>> {
        self.get_qa_record_by_id_impl(record_id).await
    }

    async fn delete_qa_record(&self, record_id: i64, user_id: i64) -> Result<bool> {
        self.delete_qa_record_impl(record_id, user_id).await
    }

    // 测验模块
    async fn create_quiz_with_questions(
        &self,
        quiz: CreateQuizRequest,
    ) -> Result<(Quiz, Vec<Question>)> {
        self.create_quiz_with_questions_impl(quiz).await
    }

    async fn get_quiz_by_id(&self, quiz_id: i64) -> Result<Option<Quiz>> {
        self.get_quiz_by_id_impl(quiz_id).await
    }

    async fn list_course_quizzes(&self, course_id: i64) -> Result<Vec<Quiz>> {
        self.list_course_quizzes_impl(course_id).await
    }

    async fn get_quiz_questions(&self, quiz_id: i64) -> Result<Vec<Question>> {
        self.get_quiz_questions_impl(quiz_id).await
    }

    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<Question>> {
        self.get_question_by_id_impl(question_id).await
    }

    async fn delete_quiz(&self, quiz_id: i64) -> Result<bool> {
        self.delete_quiz_impl(quiz_id).await
    }

    // 作答模块
    async fn create_attempt(
        &self,
        quiz_id: i64,
        student_id: i64,
        total_points: f64,
    ) -> Result<QuizAttempt> {
        self.create_attempt_impl(quiz_id, student_id, total_points)
            .await
    }

    async fn get_attempt_by_id(&self, attempt_id: i64) -> Result<Option<QuizAttempt>> {
        self.get_attempt_by_id_impl(attempt_id).await
    }

    async fn create_answer(&self, answer: NewAnswer) -> Result<Answer> {
        self.create_answer_impl(answer).await
    }

    async fn get_answer_by_attempt_and_question(
        &self,
        attempt_id: i64,
        question_id: i64,
    ) -> Result<Option<Answer>> {
        self.get_answer_by_attempt_and_question_impl(attempt_id, question_id)
            .await
    }

    async fn list_attempt_answers(&self, attempt_id: i64) -> Result<Vec<Answer>> {
        self.list_attempt_answers_impl(attempt_id).await
    }

    async fn complete_attempt(&self, attempt_id: i64, score: f64) -> Result<QuizAttempt> {
        self.complete_attempt_impl(attempt_id, score).await
    }

    async fn list_completed_attempts(&self, quiz_id: i64) -> Result<Vec<QuizAttempt>> {
        self.list_completed_attempts_impl(quiz_id).await
    }

    async fn list_student_attempts(
        &self,
        student_id: i64,
        course_id: Option<i64>,
    ) -> Result<Vec<QuizAttempt>> {
        self.list_student_attempts_impl(student_id, course_id).await
    }
}
