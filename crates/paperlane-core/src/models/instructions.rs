//! Processing instructions attached to a conversion request.
//!
//! A closed set of named options. Every field documents its effect when
//! absent; nothing is invented downstream. Unknown fields are rejected at the
//! boundary so a typo'd option fails loudly instead of silently doing nothing.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Target output format. Only PDF is supported by the conversion service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
        }
    }
}

/// What the conversion service should do with the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Plain conversion to the target format.
    #[default]
    Convert,
    /// Conversion plus redaction of flagged content.
    Redact,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Convert => "convert",
            ActionKind::Redact => "redact",
        }
    }
}

/// User-selected processing options, as received in the `instructions`
/// multipart field (JSON-encoded).
///
/// Absent boolean fields mean the feature is disabled; absent `format` and
/// `action` mean plain PDF conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProcessingInstructions {
    /// Run OCR on scanned pages. Off when absent.
    #[serde(default)]
    pub ocr: bool,
    /// Redact flagged content. Off when absent.
    #[serde(default)]
    pub redact: bool,
    /// Strip document metadata (author, revision history). Off when absent.
    #[serde(default)]
    pub strip_metadata: bool,
    /// Target format. PDF when absent.
    #[serde(default)]
    pub format: OutputFormat,
    /// Processing action. Plain conversion when absent.
    #[serde(default)]
    pub action: ActionKind,
}
