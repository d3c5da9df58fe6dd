use serde::Serialize;

/// Successful compliance check: the generated Markdown report.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub success: bool,
    pub result: String,
}

impl CheckResponse {
    pub fn new(result: String) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

/// Error envelope shared by validation and internal failures.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
