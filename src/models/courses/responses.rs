use serde::{Deserialize, Serialize};

use super::entities::Course;

// 课程列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseListResponse {
    pub courses: Vec<Course>,
    pub total: usize,
}
