pub mod ai;
pub mod auth;
pub mod courses;
pub mod documents;
pub mod permissions;
pub mod qa;
pub mod quizzes;

pub use ai::AiService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use documents::DocumentService;
pub use qa::QaService;
pub use quizzes::QuizService;
