//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse for AppError` impl lives in `docshelf-core` (the crate
//! that owns `AppError`), since Rust's orphan rule forbids implementing a
//! foreign trait for a foreign type here. This module hosts the
//! request-DTO validation helper.

use docshelf_core::error::AppError;

/// Run `validator` checks on a request DTO, converting failures into a
/// validation error whose details list the offending fields.
pub fn validate_dto<T: validator::Validate>(dto: &T) -> Result<(), AppError> {
    dto.validate().map_err(|errors| {
        let details = serde_json::to_value(&errors).unwrap_or(serde_json::Value::Null);
        AppError::validation("Request validation failed").with_details(details)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshelf_core::error::ErrorKind;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 3))]
        name: String,
    }

    #[test]
    fn test_validate_dto_collects_field_issues() {
        let err = validate_dto(&Probe {
            name: "x".to_string(),
        })
        .expect_err("too short");
        assert_eq!(err.kind, ErrorKind::Validation);
        let details = err.details.expect("details");
        assert!(details.get("name").is_some());
    }

    #[test]
    fn test_validate_dto_passes_valid_input() {
        assert!(
            validate_dto(&Probe {
                name: "abc".to_string(),
            })
            .is_ok()
        );
    }
}
