//! Tagged outcome handed to callbacks by the mock API.

use serde::{Deserialize, Serialize};

/// Outcome of a callback-style request.
///
/// Serialized with a `status` discriminant: `"success"` carries `data`,
/// `"error"` carries an `error` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ApiResponse<T> {
    #[serde(rename = "success")]
    Success { data: T },
    #[serde(rename = "error")]
    Failure { error: String },
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse::Success { data }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ApiResponse::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }

    /// Convert into a `Result`, keeping the error message untouched.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            ApiResponse::Success { data } => Ok(data),
            ApiResponse::Failure { error } => Err(error),
        }
    }
}

impl<T> From<Result<T, String>> for ApiResponse<T> {
    fn from(result: Result<T, String>) -> Self {
        match result {
            Ok(data) => ApiResponse::Success { data },
            Err(error) => ApiResponse::Failure { error },
        }
    }
}
