use serde::{Deserialize, Serialize};

// 题目类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Choice,      // 选择题
    TrueFalse,   // 判断题
    ShortAnswer, // 简答题
}

impl QuestionType {
    pub const CHOICE: &'static str = "choice";
    pub const TRUE_FALSE: &'static str = "true_false";
    pub const SHORT_ANSWER: &'static str = "short_answer";

    // 客观题按字符串相等判分，主观题交给 AI
    pub fn is_objective(&self) -> bool {
        matches!(self, QuestionType::Choice | QuestionType::TrueFalse)
    }
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<QuestionType>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::Choice => write!(f, "{}", QuestionType::CHOICE),
            QuestionType::TrueFalse => write!(f, "{}", QuestionType::TRUE_FALSE),
            QuestionType::ShortAnswer => write!(f, "{}", QuestionType::SHORT_ANSWER),
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            QuestionType::CHOICE => Ok(QuestionType::Choice),
            QuestionType::TRUE_FALSE => Ok(QuestionType::TrueFalse),
            QuestionType::SHORT_ANSWER => Ok(QuestionType::ShortAnswer),
            _ => Err(format!(
                "无效的题目类型: '{s}'. 支持的类型: choice, true_false, short_answer"
            )),
        }
    }
}

// 测验信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_point: Option<String>,
    pub time_limit: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 题目信息，correct_answer 与 explanation 仅教师可见
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub question_type: QuestionType,
    pub question_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub points: f64,
}

impl Question {
    // 学生视角，隐藏答案与解析
    pub fn into_student_view(self) -> StudentQuestion {
        StudentQuestion {
            id: self.id,
            quiz_id: self.quiz_id,
            question_type: self.question_type,
            question_text: self.question_text,
            options: self.options,
            points: self.points,
        }
    }
}

// 脱敏后的题目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentQuestion {
    pub id: i64,
    pub quiz_id: i64,
    pub question_type: QuestionType,
    pub question_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub points: f64,
}

// 测验尝试
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: i64,
    pub quiz_id: i64,
    pub student_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub total_points: f64,
    pub is_completed: bool,
    pub started_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}

// 单题作答结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub attempt_id: i64,
    pub question_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_answer: Option<String>,
    pub is_correct: bool,
    pub points_earned: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_feedback: Option<String>,
}

// 判分完成后待落库的答案
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub attempt_id: i64,
    pub question_id: i64,
    pub student_answer: Option<String>,
    pub is_correct: bool,
    pub points_earned: f64,
    pub ai_feedback: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_round_trips_through_str() {
        for (s, ty) in [
            ("choice", QuestionType::Choice),
            ("true_false", QuestionType::TrueFalse),
            ("short_answer", QuestionType::ShortAnswer),
        ] {
            assert_eq!(s.parse::<QuestionType>(), Ok(ty));
            assert_eq!(ty.to_string(), s);
        }
        assert!("essay".parse::<QuestionType>().is_err());
    }

    #[test]
    fn objective_split() {
        assert!(QuestionType::Choice.is_objective());
        assert!(QuestionType::TrueFalse.is_objective());
        assert!(!QuestionType::ShortAnswer.is_objective());
    }

    #[test]
    fn student_view_hides_answer() {
        let q = Question {
            id: 1,
            quiz_id: 2,
            question_type: QuestionType::Choice,
            question_text: "1+1=?".to_string(),
            options: Some(vec!["1".to_string(), "2".to_string()]),
            correct_answer: "2".to_string(),
            explanation: Some("基础算术".to_string()),
            points: 10.0,
        };
        let view = q.into_student_view();
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("correct_answer").is_none());
        assert!(json.get("explanation").is_none());
    }
}
