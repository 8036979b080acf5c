use defi_types::SwapError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregatorClientError {
    /// The request failed.
    #[error(transparent)]
    RequestError(#[from] ReqwestError),
    /// No response within the configured timeout.
    #[error("Request timed out")]
    Timeout,
    /// The API key secret is not configured.
    #[error("Aggregator API key is not configured")]
    MissingApiKey,
    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The response could not be deserialized.
    #[error("Deserialization error: {err}. Status: {status}. Response: {text}")]
    ResponseSerdeJson { err: serde_json::Error, status: u16, text: String },
    /// The response parsed but is not a usable aggregator answer.
    #[error(transparent)]
    Response(#[from] SwapError),
}

impl AggregatorClientError {
    pub(crate) fn from_reqwest(err: ReqwestError) -> Self {
        if err.is_timeout() {
            AggregatorClientError::Timeout
        } else {
            AggregatorClientError::RequestError(err)
        }
    }
}

impl From<AggregatorClientError> for SwapError {
    fn from(value: AggregatorClientError) -> Self {
        match value {
            AggregatorClientError::Timeout => SwapError::Timeout("aggregator"),
            AggregatorClientError::MissingApiKey => SwapError::Config(value.to_string()),
            AggregatorClientError::Response(e) => e,
            e => SwapError::Upstream(e.to_string()),
        }
    }
}
