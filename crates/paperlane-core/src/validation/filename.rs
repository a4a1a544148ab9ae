//! Filename handling: sanitization and output-name derivation.

use crate::error::AppError;

const MAX_FILENAME_LENGTH: usize = 255;

/// Sanitize a client-supplied filename to prevent path traversal and invalid
/// characters. Returns an error if the filename is a path traversal attempt.
pub fn sanitize_filename(filename: &str) -> Result<String, AppError> {
    let path = std::path::Path::new(filename);
    let filename_only = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    if filename_only.contains("..") {
        return Err(AppError::InvalidInput(
            "Filename contains invalid path traversal".to_string(),
        ));
    }

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Ok("document".to_string());
    }

    Ok(sanitized)
}

/// Derive the download filename for a converted document: the source name
/// with its final extension replaced by `.pdf`. Extensionless names get
/// `.pdf` appended.
pub fn pdf_filename(source_filename: &str) -> String {
    let stem = std::path::Path::new(source_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("document");
    format!("{}.pdf", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_filename_replaces_extension() {
        assert_eq!(pdf_filename("report.docx"), "report.pdf");
        assert_eq!(pdf_filename("minutes.DOC"), "minutes.pdf");
        assert_eq!(pdf_filename("already.pdf"), "already.pdf");
    }

    #[test]
    fn pdf_filename_appends_for_extensionless_names() {
        assert_eq!(pdf_filename("scan"), "scan.pdf");
    }

    #[test]
    fn pdf_filename_keeps_only_the_last_extension() {
        assert_eq!(pdf_filename("archive.tar.gz"), "archive.tar.pdf");
    }

    #[test]
    fn pdf_filename_handles_degenerate_names() {
        assert_eq!(pdf_filename(""), "document.pdf");
        assert_eq!(pdf_filename(".hidden"), ".hidden.pdf");
    }

    #[test]
    fn sanitize_filename_rejects_path_traversal() {
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("foo/../bar").is_err());
    }

    #[test]
    fn sanitize_filename_strips_directories() {
        assert_eq!(sanitize_filename("/etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("dir/report.docx").unwrap(), "report.docx");
    }

    #[test]
    fn sanitize_filename_replaces_odd_characters() {
        assert_eq!(
            sanitize_filename("q3 budget (final).docx").unwrap(),
            "q3_budget__final_.docx"
        );
    }

    #[test]
    fn sanitize_filename_accepts_valid_names() {
        assert_eq!(sanitize_filename("report.docx").unwrap(), "report.docx");
        assert_eq!(sanitize_filename("my-file_1.pdf").unwrap(), "my-file_1.pdf");
    }
}
