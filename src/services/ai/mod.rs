//! AI 服务网关（DeepSeek API，OpenAI 兼容接口）
//!
//! 所有调用软失败：网络或接口异常时返回错误说明文本而不是中断业务流程，
//! 问答、出题、批改各自给出兜底行为。

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::AppConfig;

/// 聊天消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// 主观题批改结果
#[derive(Debug, Clone, PartialEq)]
pub struct GradeResult {
    /// 0-10 分
    pub score: f64,
    pub feedback: String,
}

static SCORE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("Invalid score number regex"));

/// 从批改回复中提取分数
///
/// 取第一个含「分数」或「得分」的行中的第一个整数，找不到时默认 5.0。
pub fn parse_score(response: &str) -> f64 {
    for line in response.lines() {
        if line.contains("分数") || line.contains("得分") {
            if let Some(m) = SCORE_NUMBER_RE.find(line) {
                if let Ok(score) = m.as_str().parse::<f64>() {
                    return score;
                }
            }
        }
    }
    5.0
}

pub struct AiService {
    client: reqwest::Client,
}

impl AiService {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// 调用聊天接口，失败时返回错误说明文本
    pub async fn chat(&self, messages: &[ChatMessage]) -> String {
        let config = AppConfig::get();
        self.chat_with(messages, config.ai.temperature).await
    }

    /// 指定温度调用聊天接口
    pub async fn chat_with(&self, messages: &[ChatMessage], temperature: f64) -> String {
        match self.chat_inner(messages, temperature).await {
            Ok(content) => content,
            Err(e) => {
                warn!("AI chat request failed: {}", e);
                format!("AI服务调用失败: {e}")
            }
        }
    }

    async fn chat_inner(
        &self,
        messages: &[ChatMessage],
        temperature: f64,
    ) -> Result<String, String> {
        let config = AppConfig::get();

        let request = ChatCompletionRequest {
            model: &config.ai.model,
            messages,
            temperature,
            max_tokens: config.ai.max_tokens,
        };

        let url = format!(
            "{}/chat/completions",
            config.ai.api_base_url.trim_end_matches('/')
        );

        debug!("Sending chat completion request to {}", url);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", config.ai.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("HTTP {status}: {body}"));
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(|e| e.to_string())?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| "响应中没有候选回复".to_string())
    }

    /// 基于课程资料回答学生问题
    pub async fn answer_question(&self, question: &str, context: &str) -> String {
        let system_prompt = "你是一个专业的AI助教，负责回答学生关于课程内容的问题。\n\
请基于提供的课程资料回答问题，如果资料中没有相关信息，请诚实地告知学生。\n\
回答要清晰、准确、有条理。";

        let user_message = format!(
            "课程资料：\n{context}\n\n学生问题：{question}\n\n请基于上述课程资料回答学生的问题。"
        );

        let messages = [
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_message),
        ];

        self.chat(&messages).await
    }

    /// 根据知识点与课程内容生成测验题目，返回 AI 原始回复（期望为 JSON 数组）
    pub async fn generate_quiz_questions(
        &self,
        knowledge_point: &str,
        context: &str,
        count: u32,
    ) -> String {
        let system_prompt = "你是一个专业的试题生成专家。请根据给定的知识点和课程内容生成测验题目。\n\
题目类型包括：选择题、判断题、简答题。\n\
返回格式为JSON数组，每个题目包含：\n\
- type: 题目类型 (choice/true_false/short_answer)\n\
- question: 题目内容\n\
- options: 选项（选择题和判断题需要）\n\
- correct_answer: 正确答案\n\
- explanation: 答案解析";

        let user_message = format!(
            "知识点：{knowledge_point}\n\n课程内容：\n{context}\n\n请生成{count}道测验题目，包括选择题、判断题和简答题。"
        );

        let messages = [
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_message),
        ];

        self.chat_with(&messages, 0.7).await
    }

    /// 批改主观题，返回 0-10 分与反馈全文
    pub async fn grade_answer(
        &self,
        question: &str,
        correct_answer: &str,
        student_answer: &str,
    ) -> GradeResult {
        let system_prompt = "你是一个专业的作业批改老师。请评估学生的答案，给出分数（0-10分）和详细反馈。\n\
评分标准：\n\
- 完全正确：10分\n\
- 基本正确但有小瑕疵：7-9分\n\
- 部分正确：4-6分\n\
- 基本错误但有可取之处：1-3分\n\
- 完全错误：0分\n\n\
返回格式：\n\
分数：X分\n\
反馈：详细的评价和建议";

        let user_message = format!(
            "题目：{question}\n\n标准答案：{correct_answer}\n\n学生答案：{student_answer}\n\n请给出评分和反馈。"
        );

        let messages = [
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_message),
        ];

        let response = self.chat_with(&messages, 0.3).await;
        let score = parse_score(&response);

        GradeResult {
            score,
            feedback: response,
        }
    }
}

impl Default for AiService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_score_from_standard_format() {
        assert_eq!(parse_score("分数：8分\n反馈：答得不错"), 8.0);
        assert_eq!(parse_score("得分: 10\n很好"), 10.0);
    }

    #[test]
    fn parse_score_takes_first_matching_line() {
        let response = "反馈在前\n分数：3分\n得分：9分";
        assert_eq!(parse_score(response), 3.0);
    }

    #[test]
    fn parse_score_defaults_when_missing() {
        assert_eq!(parse_score("这道题答得还可以"), 5.0);
        assert_eq!(parse_score(""), 5.0);
        // 行内没有数字也回落默认值
        assert_eq!(parse_score("分数：待定"), 5.0);
    }

    #[test]
    fn chat_message_roles() {
        assert_eq!(ChatMessage::system("a").role, "system");
        assert_eq!(ChatMessage::user("b").role, "user");
    }
}
