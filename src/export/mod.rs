//! Tabular document export (Excel and PDF)
//!
//! Reports are first flattened into a [`Table`], then rendered by the
//! backend matching the requested [`ExportFormat`]. The result is an
//! [`ExportedFile`] that responds as an attachment.

mod excel;
mod pdf;

use crate::core::error::RequestError;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use thiserror::Error;

/// Document rendering failures
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet rendering failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("pdf rendering failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("i/o error while rendering: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Pdf,
}

impl ExportFormat {
    /// Parse the `format` query parameter; missing means xlsx
    pub fn parse(raw: Option<&str>) -> Result<Self, RequestError> {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("xlsx") | Some("excel") => Ok(ExportFormat::Xlsx),
            Some("pdf") => Ok(ExportFormat::Pdf),
            Some(other) => Err(RequestError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// One table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Money(Decimal),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Plain-text rendering used by the PDF backend
    pub fn display(&self, currency: &str) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Integer(n) => n.to_string(),
            Cell::Money(amount) => format!("{} {}", amount.round_dp(2), currency),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Cell::Money(value)
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Cell::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Integer(i64::from(value))
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

/// A titled table with optional summary rows below it
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub title: String,
    pub subtitle: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// Label/value pairs printed after the rows
    pub summary: Vec<(String, Cell)>,
    /// Currency label for money cells
    pub currency: String,
}

impl Table {
    pub fn new(title: impl Into<String>, headers: &[&str], currency: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            currency: currency.into(),
            ..Default::default()
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn push_summary(&mut self, label: impl Into<String>, value: impl Into<Cell>) {
        self.summary.push((label.into(), value.into()));
    }
}

/// A rendered document ready to be sent as an attachment
#[derive(Debug)]
pub struct ExportedFile {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
    pub filename: String,
}

impl ExportedFile {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Render a table in the given format. `stem` names the file, without
/// extension.
pub fn render(table: &Table, format: ExportFormat, stem: &str) -> Result<ExportedFile, ExportError> {
    let bytes = match format {
        ExportFormat::Xlsx => excel::render(table)?,
        ExportFormat::Pdf => pdf::render(table)?,
    };

    tracing::info!(
        title = %table.title,
        format = format.extension(),
        rows = table.rows.len(),
        bytes = bytes.len(),
        "document exported"
    );

    Ok(ExportedFile {
        bytes,
        format,
        filename: format!("{}.{}", stem, format.extension()),
    })
}

impl IntoResponse for ExportedFile {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.filename);
        let mut response = self.bytes.into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(self.format.content_type()),
        );
        if let Ok(value) = HeaderValue::from_str(&disposition) {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }
        response
    }
}
