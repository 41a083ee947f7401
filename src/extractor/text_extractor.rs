use crate::error::{AntecedentesError, Result};
use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};
use std::path::Path;

/// Declared document kind. Anything that is not a PDF goes through the DOCX
/// reader, mirroring how uploads were routed in the original tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Pdf,
    Docx,
}

impl MediaKind {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let is_pdf = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            MediaKind::Pdf
        } else {
            MediaKind::Docx
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Pdf => "PDF",
            MediaKind::Docx => "DOCX",
        }
    }
}

/// Extracts plain text from a document held in memory.
///
/// Returns the trimmed text, which may legitimately be empty for a blank
/// document. Unreadable input is a distinct `Extraction` error so callers can
/// tell the two apart; the batch layer degrades it to an empty record.
pub fn extract_text(kind: MediaKind, name: &str, data: &[u8]) -> Result<String> {
    let text = match kind {
        MediaKind::Pdf => extract_pdf_text(name, data)?,
        MediaKind::Docx => extract_docx_text(name, data)?,
    };

    Ok(text.trim().to_string())
}

fn extract_pdf_text(name: &str, data: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| AntecedentesError::Extraction {
        path: name.to_string(),
        reason: e.to_string(),
    })
}

/// Walks the document tree joining paragraph and table-cell text with
/// newlines, the same shape the flow-document reader produced upstream.
fn extract_docx_text(name: &str, data: &[u8]) -> Result<String> {
    let package = read_docx(data).map_err(|e| AntecedentesError::Extraction {
        path: name.to_string(),
        reason: e.to_string(),
    })?;

    let mut segments = Vec::new();
    for child in &package.document.children {
        collect_document_child(child, &mut segments);
    }

    Ok(segments.join("\n"))
}

fn collect_document_child(child: &DocumentChild, segments: &mut Vec<String>) {
    match child {
        DocumentChild::Paragraph(paragraph) => {
            if let Some(text) = paragraph_text(paragraph.as_ref()) {
                segments.push(text);
            }
        }
        DocumentChild::Table(table) => collect_table(table.as_ref(), segments),
        _ => {}
    }
}

fn paragraph_text(paragraph: &Paragraph) -> Option<String> {
    let mut buffer = String::new();
    for child in &paragraph.children {
        collect_paragraph_child(child, &mut buffer);
    }

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn collect_paragraph_child(child: &ParagraphChild, buffer: &mut String) {
    match child {
        ParagraphChild::Run(run) => append_run_text(run.as_ref(), buffer),
        ParagraphChild::Hyperlink(hyperlink) => {
            for inner in &hyperlink.children {
                collect_paragraph_child(inner, buffer);
            }
        }
        _ => {}
    }
}

fn append_run_text(run: &Run, buffer: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => buffer.push_str(&text.text),
            RunChild::Tab(_) => buffer.push(' '),
            RunChild::Break(_) => buffer.push('\n'),
            _ => {}
        }
    }
}

fn collect_table(table: &Table, segments: &mut Vec<String>) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            for content in &cell.children {
                if let TableCellContent::Paragraph(paragraph) = content {
                    if let Some(text) = paragraph_text(paragraph) {
                        segments.push(text);
                    }
                }
            }
        }
    }
}
