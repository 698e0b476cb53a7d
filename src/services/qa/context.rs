//! 问答上下文拼装
//!
//! 将课程资料合并成带【文件名】标题的文本，按字符数截断。
//! 向量检索是后续方向，当前按上传顺序拼接并截取前缀。

use crate::models::documents::entities::Document;

/// 无资料时的占位上下文
pub const EMPTY_CONTEXT: &str = "暂无课程资料";

/// 问答记录中上下文快照的最大字符数
pub const CONTEXT_SNAPSHOT_CHARS: usize = 500;

/// 拼装课程资料上下文，超过 max_length 个字符时截断并追加省略号
///
/// `_question` 当前不参与排序，接口保留该参数以便将来替换为语义检索。
pub fn build_context(_question: &str, documents: &[Document], max_length: usize) -> String {
    if documents.is_empty() {
        return EMPTY_CONTEXT.to_string();
    }

    let mut all_content = String::new();
    for doc in documents {
        if let Some(content) = &doc.content {
            all_content.push_str(&format!("\n\n【{}】\n{}", doc.filename, content));
        }
    }

    truncate_chars(&all_content, max_length)
}

/// 按字符数截断，被截断时追加 "..."
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn doc(filename: &str, content: Option<&str>) -> Document {
        Document {
            id: 1,
            course_id: 1,
            filename: filename.to_string(),
            filepath: format!("/tmp/{filename}"),
            file_type: None,
            content: content.map(|s| s.to_string()),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn empty_documents_yield_placeholder() {
        assert_eq!(build_context("问题", &[], 2000), EMPTY_CONTEXT);
    }

    #[test]
    fn documents_get_filename_headers() {
        let docs = vec![doc("第一章.pdf", Some("指针基础")), doc("第二章.pdf", Some("所有权"))];
        let context = build_context("问题", &docs, 2000);
        assert!(context.contains("【第一章.pdf】"));
        assert!(context.contains("指针基础"));
        assert!(context.contains("【第二章.pdf】"));
        assert!(context.contains("所有权"));
    }

    #[test]
    fn documents_without_content_are_skipped() {
        let docs = vec![doc("空文档.pdf", None), doc("有内容.txt", Some("内容"))];
        let context = build_context("问题", &docs, 2000);
        assert!(!context.contains("空文档"));
        assert!(context.contains("【有内容.txt】"));
    }

    #[test]
    fn all_empty_documents_yield_empty_string() {
        // 有文档但都没有内容时不返回占位符，与原始行为保持一致
        let docs = vec![doc("a.pdf", None)];
        assert_eq!(build_context("问题", &docs, 2000), "");
    }

    #[test]
    fn context_is_truncated_by_chars() {
        let long = "课".repeat(3000);
        let docs = vec![doc("长文档.txt", Some(&long))];
        let context = build_context("问题", &docs, 2000);
        assert_eq!(context.chars().count(), 2003); // 2000 字符 + "..."
        assert!(context.ends_with("..."));
    }

    #[test]
    fn truncate_chars_boundary() {
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abcd", 3), "abc...");
        assert_eq!(truncate_chars("数据结构", 2), "数据...");
    }
}
