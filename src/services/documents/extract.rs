//! 文档文本抽取与分块
//!
//! 抽取失败不会中断上传流程：失败时返回说明文字作为文档内容，
//! 后续问答上下文中会原样呈现，便于教师发现坏文件。

use std::path::Path;

use crate::errors::{CourseSystemError, Result};

/// 支持的文档类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
    PlainText,
}

impl DocumentKind {
    /// 从文件扩展名推断文档类型
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" | "doc" => Some(DocumentKind::Word),
            "txt" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// 根据文件类型自动提取文本
pub fn extract_text(path: &Path) -> String {
    match DocumentKind::from_path(path) {
        Some(DocumentKind::Pdf) => extract_text_from_pdf(path),
        Some(DocumentKind::Word) => extract_text_from_docx(path),
        Some(DocumentKind::PlainText) => extract_text_from_txt(path),
        None => "不支持的文件格式".to_string(),
    }
}

fn extract_text_from_pdf(path: &Path) -> String {
    match pdf_extract::extract_text(path) {
        Ok(text) => text,
        Err(e) => format!("PDF解析失败: {e}"),
    }
}

fn extract_text_from_docx(path: &Path) -> String {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return format!("Word文档解析失败: {e}"),
    };

    match docx_rs::read_docx(&bytes) {
        Ok(docx) => {
            let mut text = String::new();
            for child in docx.document.children {
                if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
                    for p_child in paragraph.children {
                        if let docx_rs::ParagraphChild::Run(run) = p_child {
                            for r_child in run.children {
                                if let docx_rs::RunChild::Text(t) = r_child {
                                    text.push_str(&t.text);
                                }
                            }
                        }
                    }
                    text.push('\n');
                }
            }
            text
        }
        Err(e) => format!("Word文档解析失败: {e}"),
    }
}

fn extract_text_from_txt(path: &Path) -> String {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return format!("文本文件读取失败: {e}"),
    };

    // 先按 UTF-8 读取，失败时回退 GBK
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, had_errors) = encoding_rs::GBK.decode(&bytes);
            if had_errors {
                "文本文件读取失败: 无法识别的编码".to_string()
            } else {
                decoded.into_owned()
            }
        }
    }
}

/// 将文本按字符数分块，相邻块之间保留 overlap 个字符的重叠
///
/// 全空白的块会被丢弃。overlap 必须小于 chunk_size，否则无法推进。
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>> {
    if chunk_size == 0 {
        return Err(CourseSystemError::validation("chunk_size 必须大于 0"));
    }
    if overlap >= chunk_size {
        return Err(CourseSystemError::validation(
            "overlap 必须小于 chunk_size",
        ));
    }

    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        let chunk: String = chars[start..end].iter().collect();
        if !chunk.trim().is_empty() {
            chunks.push(chunk);
        }
        start += chunk_size - overlap;
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_extension() {
        assert_eq!(DocumentKind::from_extension("pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_extension("PDF"), Some(DocumentKind::Pdf));
        assert_eq!(
            DocumentKind::from_extension("docx"),
            Some(DocumentKind::Word)
        );
        assert_eq!(DocumentKind::from_extension("doc"), Some(DocumentKind::Word));
        assert_eq!(
            DocumentKind::from_extension("txt"),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(DocumentKind::from_extension("exe"), None);
    }

    #[test]
    fn unsupported_format_message() {
        let text = extract_text(Path::new("slides.pptx"));
        assert_eq!(text, "不支持的文件格式");
    }

    #[test]
    fn chunk_text_with_overlap() {
        let text = "abcdefghij";
        let chunks = chunk_text(text, 4, 1).unwrap();
        assert_eq!(chunks, vec!["abcd", "defg", "ghij", "j"]);
    }

    #[test]
    fn chunk_text_counts_chars_not_bytes() {
        let text = "数据结构与算法基础";
        let chunks = chunk_text(text, 5, 0).unwrap();
        assert_eq!(chunks, vec!["数据结构与", "算法基础"]);
    }

    #[test]
    fn chunk_text_skips_blank_chunks() {
        let text = "ab      cd";
        let chunks = chunk_text(text, 3, 0).unwrap();
        assert!(chunks.iter().all(|c| !c.trim().is_empty()));
    }

    #[test]
    fn chunk_text_rejects_bad_parameters() {
        assert!(chunk_text("abc", 0, 0).is_err());
        assert!(chunk_text("abc", 3, 3).is_err());
        assert!(chunk_text("abc", 3, 5).is_err());
    }

    #[test]
    fn chunk_text_empty_input() {
        assert!(chunk_text("", 100, 10).unwrap().is_empty());
    }
}
