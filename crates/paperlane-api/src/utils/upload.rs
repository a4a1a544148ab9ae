//! Common utilities for multipart upload handlers

use axum::extract::Multipart;
use paperlane_core::AppError;

/// A `file` field extracted from a multipart body.
#[derive(Debug)]
pub struct UploadedFile {
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

/// Fields of a convert request. Either part may be absent; handlers decide
/// which absences are errors.
#[derive(Debug, Default)]
pub struct ConvertForm {
    pub file: Option<UploadedFile>,
    pub instructions: Option<String>,
}

/// Extract the `file` and `instructions` fields from a multipart form.
/// Only one field named "file" is accepted; multiple file fields are rejected.
/// Unknown fields are skipped.
pub async fn extract_convert_form(mut multipart: Multipart) -> Result<ConvertForm, AppError> {
    let mut form = ConvertForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                if form.file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                let filename = field.file_name().map(|s: &str| s.to_string());
                let content_type = field.content_type().map(|s: &str| s.to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;

                form.file = Some(UploadedFile {
                    bytes: data.to_vec(),
                    filename,
                    content_type,
                });
            }
            "instructions" => {
                let text = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read instructions field: {}", e))
                })?;
                form.instructions = Some(text);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Extract only the `file` field from a multipart form.
pub async fn extract_multipart_file(multipart: Multipart) -> Result<Option<UploadedFile>, AppError> {
    Ok(extract_convert_form(multipart).await?.file)
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

/// Normalize MIME type by stripping parameters (e.g. "application/pdf; charset=utf-8" -> "application/pdf").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Validate content type against an allowlist. An empty allowlist accepts
/// any content type. Compares normalized MIME type only (no parameter bypass).
pub fn validate_content_type(content_type: &str, allowed_types: &[String]) -> Result<(), AppError> {
    if allowed_types.is_empty() {
        return Ok(());
    }
    let normalized = normalize_mime_type(content_type).to_lowercase();
    if !allowed_types.iter().any(|ct| normalized == ct.to_lowercase()) {
        return Err(AppError::InvalidInput(format!(
            "Invalid content type. Allowed types: {}",
            allowed_types.join(", ")
        )));
    }
    Ok(())
}

/// Validate file extension against an allowlist. An empty allowlist accepts
/// any extension; extensionless filenames are always accepted (the derived
/// output name still gets `.pdf`).
pub fn validate_file_extension(
    filename: &str,
    allowed_extensions: &[String],
) -> Result<(), AppError> {
    if allowed_extensions.is_empty() || !filename.contains('.') {
        return Ok(());
    }
    let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    if !allowed_extensions.iter().any(|e| e.to_lowercase() == extension) {
        return Err(AppError::InvalidInput(format!(
            "Invalid file extension. Allowed extensions: {}",
            allowed_extensions.join(", ")
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_file_size_enforces_limit() {
        assert!(validate_file_size(10, 100).is_ok());
        assert!(validate_file_size(100, 100).is_ok());
        assert!(validate_file_size(101, 100).is_err());
    }

    #[test]
    fn validate_content_type_empty_allowlist_accepts_anything() {
        assert!(validate_content_type("application/x-unheard-of", &[]).is_ok());
    }

    #[test]
    fn validate_content_type_normalizes_parameters() {
        let allowed = vec!["application/pdf".to_string()];
        assert!(validate_content_type("application/pdf; charset=utf-8", &allowed).is_ok());
        assert!(validate_content_type("text/html", &allowed).is_err());
    }

    #[test]
    fn validate_file_extension_accepts_extensionless_names() {
        let allowed = vec!["docx".to_string()];
        assert!(validate_file_extension("scan", &allowed).is_ok());
        assert!(validate_file_extension("report.docx", &allowed).is_ok());
        assert!(validate_file_extension("report.DOCX", &allowed).is_ok());
        assert!(validate_file_extension("report.exe", &allowed).is_err());
    }
}
