//! Resume text extraction — extension dispatch plus the PDF/DOCX readers.

use crate::errors::AppError;

/// Only these two formats are accepted; the check happens before any bytes
/// are parsed or any model call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
}

impl FileKind {
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(FileKind::Pdf)
        } else if lower.ends_with(".docx") {
            Some(FileKind::Docx)
        } else {
            None
        }
    }
}

/// Cost/latency bound on the text fed to the model. Truncation may cut
/// mid-sentence; that is an accepted limitation, not a correctness concern.
pub const TEXT_LIMIT: usize = 3000;

pub fn extract_text(kind: FileKind, bytes: &[u8]) -> Result<String, AppError> {
    match kind {
        FileKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| AppError::FileRead(e.to_string()))
        }
        FileKind::Docx => extract_docx(bytes),
    }
}

/// Concatenates DOCX paragraph text with newline separators.
fn extract_docx(bytes: &[u8]) -> Result<String, AppError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| AppError::FileRead(e.to_string()))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for para_child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = para_child {
                    for run_child in run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }

    Ok(text)
}

/// Truncates to at most `max` characters without splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
