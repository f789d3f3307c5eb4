use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const NOT_FOUND_TITLE: &str = "Not Found";
pub const VALIDATION_TITLE: &str = "One or more validation errors occurred.";

/// `application/problem+json` body returned for 4xx responses.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub title:      Option<String>,
    pub status:     Option<i32>,
    pub trace_id:   Option<String>,
    /// Keyed by JSON path of the offending field, e.g. `$.pageCount`.
    /// Only present on 400.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors:     Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorResponse {
    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors
            .as_ref()
            .map_or(false, |errors| errors.contains_key(field))
    }

    pub fn has_trace_id(&self) -> bool {
        self.trace_id.as_deref().map_or(false, |id| !id.is_empty())
    }
}
