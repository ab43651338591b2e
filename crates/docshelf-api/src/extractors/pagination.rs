//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use docshelf_core::types::pagination::PageRequest;

/// Query parameters for paginated endpoints
/// (`?pageNumber=2&pageSize=50`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page_number: u64,
    /// Items per page (default: 25, max: 100).
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page_number: default_page(),
            page_size: default_page_size(),
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    25
}

impl PaginationParams {
    /// Converts to a `PageRequest`, clamping into the allowed range.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_query_names() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"pageNumber": 3, "pageSize": 10}"#).expect("deserialize");
        assert_eq!(params.page_number, 3);
        assert_eq!(params.page_size, 10);
    }

    #[test]
    fn test_defaults_apply() {
        let params: PaginationParams = serde_json::from_str("{}").expect("deserialize");
        let request = params.into_page_request();
        assert_eq!(request.page, 1);
        assert_eq!(request.size, 25);
    }
}
