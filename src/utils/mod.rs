pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod validate;

pub use extractor::{
    SafeAttemptIdI64, SafeCourseIdI64, SafeDocumentIdI64, SafeQuizIdI64, SafeRecordIdI64,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
