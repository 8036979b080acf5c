use serde::Serialize;

pub const MISSING_PARAMS: &str = "Missing required params: chain, from, to, amount";
pub const PROXY_ERROR: &str = "Proxy error";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn missing_params() -> Self {
        Self { error: MISSING_PARAMS.to_string(), details: None }
    }

    pub fn proxy_error(details: impl Into<String>) -> Self {
        Self { error: PROXY_ERROR.to_string(), details: Some(details.into()) }
    }
}
