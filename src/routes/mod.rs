pub mod auth;

pub mod courses;

pub mod documents;

pub mod qa;

pub mod quizzes;

pub mod system;

pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use documents::configure_documents_routes;
pub use qa::configure_qa_routes;
pub use quizzes::configure_quizzes_routes;
pub use system::configure_system_routes;
