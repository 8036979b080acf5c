use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::AggregatorClientError;

pub const DEFAULT_QUOTE_URL: &str = "https://api.1inch.io/v5.0";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteRequest {
    pub chain: String,
    pub from: String,
    pub to: String,
    pub amount: String,
}

/// Upstream answer kept as raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Clone)]
pub struct QuoteClient {
    client: Client,
    url: Url,
    timeout: Duration,
}

impl QuoteClient {
    pub fn new(url: Url, timeout: Duration) -> Self {
        Self { client: Client::new(), url, timeout }
    }

    pub fn with_client(self, client: Client) -> Self {
        Self { client, ..self }
    }

    /// `{base}/{chain}/quote?fromTokenAddress=..&toTokenAddress=..&amount=..`, each part percent-encoded.
    pub fn quote_url(&self, request: &QuoteRequest) -> Result<Url, AggregatorClientError> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|_| AggregatorClientError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(&request.chain)
            .push("quote");
        url.query_pairs_mut()
            .append_pair("fromTokenAddress", &request.from)
            .append_pair("toTokenAddress", &request.to)
            .append_pair("amount", &request.amount);
        Ok(url)
    }

    /// Issues the quote request and returns status, content type and body exactly as received.
    pub async fn fetch(&self, request: &QuoteRequest) -> Result<UpstreamResponse, AggregatorClientError> {
        let url = self.quote_url(request)?;
        debug!("Quote upstream {}", url);

        let res = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(AggregatorClientError::from_reqwest)?;

        let status = res.status().as_u16();
        let content_type = res.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()).map(str::to_string);
        let body = res.bytes().await.map_err(AggregatorClientError::from_reqwest)?.to_vec();

        Ok(UpstreamResponse { status, content_type, body })
    }
}
