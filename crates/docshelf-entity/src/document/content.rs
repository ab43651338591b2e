//! File extension and content type allow-lists.

use docshelf_core::{AppError, AppResult};

/// File extensions a document may carry.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "txt", "md", "csv", "json", "xml", "html", "pdf", "png", "jpg", "jpeg", "docx", "xlsx",
];

/// Content types a document may carry.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "text/plain",
    "text/markdown",
    "text/csv",
    "text/html",
    "application/json",
    "application/xml",
    "application/pdf",
    "image/png",
    "image/jpeg",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// Check a file extension against the allow-list (case-insensitive,
/// leading dot tolerated).
pub fn validate_extension(extension: &str) -> AppResult<()> {
    let normalized = extension.trim_start_matches('.').to_lowercase();
    if ALLOWED_EXTENSIONS.contains(&normalized.as_str()) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "File extension '{extension}' is not allowed"
        )))
    }
}

/// Check a content type against the allow-list. Parameters such as
/// `; charset=utf-8` are not accepted; the stored value is the bare type.
pub fn validate_content_type(content_type: &str) -> AppResult<()> {
    if ALLOWED_CONTENT_TYPES.contains(&content_type.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Content type '{content_type}' is not allowed"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_case_and_dot_insensitive() {
        assert!(validate_extension("pdf").is_ok());
        assert!(validate_extension("PDF").is_ok());
        assert!(validate_extension(".md").is_ok());
    }

    #[test]
    fn test_extension_rejects_unknown() {
        assert!(validate_extension("exe").is_err());
        assert!(validate_extension("").is_err());
    }

    #[test]
    fn test_content_type_rejects_parameters() {
        assert!(validate_content_type("text/plain").is_ok());
        assert!(validate_content_type("text/plain; charset=utf-8").is_err());
        assert!(validate_content_type("application/octet-stream").is_err());
    }
}
