use std::time::Duration;

use defi_types::{AggregatorResponse, SwapActionRequest};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::AggregatorClientError;

pub const DEFAULT_AGGREGATOR_URL: &str = "https://api-v2.swaps.xyz";
pub const AGGREGATOR_API_KEY_HEADER: &str = "x-api-key";

const GET_ACTION_PATH: &str = "api/getAction";

/// Client for the aggregator route-resolution API.
///
/// Every request carries the API key in the `x-api-key` header. The client never retries.
#[derive(Clone)]
pub struct AggregatorClient {
    client: Client,
    url: Url,
    api_key: Option<String>,
    timeout: Duration,
}

impl AggregatorClient {
    pub fn new(url: Url, api_key: Option<String>, timeout: Duration) -> Self {
        Self { client: Client::new(), url, api_key, timeout }
    }

    pub fn with_client(self, client: Client) -> Self {
        Self { client, ..self }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn action_url(&self, request: &SwapActionRequest) -> Result<Url, AggregatorClientError> {
        let mut base = self.url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let mut url = base.join(GET_ACTION_PATH)?;
        url.query_pairs_mut().extend_pairs(request.to_query_pairs());
        Ok(url)
    }

    /// Fetches the executable transaction and route metadata for `request`.
    ///
    /// The HTTP status is not inspected: the aggregator reports failures inside the body,
    /// which comes back as [`AggregatorResponse::Error`].
    pub async fn get_action(&self, request: &SwapActionRequest) -> Result<AggregatorResponse, AggregatorClientError> {
        let api_key = self.api_key.as_ref().ok_or(AggregatorClientError::MissingApiKey)?;
        let url = self.action_url(request)?;
        debug!(src_chain_id = request.src_chain_id, dst_chain_id = request.dst_chain_id, "getAction {}", url.path());

        let res = self
            .client
            .get(url)
            .header(AGGREGATOR_API_KEY_HEADER, api_key)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(AggregatorClientError::from_reqwest)?;

        let status = res.status().as_u16();
        let text = res.text().await.map_err(AggregatorClientError::from_reqwest)?;
        trace!("getAction response {status}: {text}");

        let value: Value =
            serde_json::from_str(&text).map_err(|err| AggregatorClientError::ResponseSerdeJson { err, status, text })?;

        Ok(AggregatorResponse::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};
    use defi_types::SwapError;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> SwapActionRequest {
        SwapActionRequest::exact_in(
            address!("108e41248841d0c0d2303222324fF21C3ca88d73"),
            address!("036CbD53842c5426634e7929541eC2318f3dCF7e"),
            84532,
            address!("2b2C81e08f1Af8835a78Bb2A90AE924ACE0eA4bE"),
            421614,
            U256::from(1_000_000u64),
        )
    }

    fn client(server: &MockServer, api_key: Option<&str>) -> AggregatorClient {
        AggregatorClient::new(Url::parse(&server.uri()).unwrap(), api_key.map(str::to_string), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_get_action_route() -> eyre::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getAction"))
            .and(header("x-api-key", "secret"))
            .and(query_param("actionType", "swap-action"))
            .and(query_param("srcChainId", "84532"))
            .and(query_param("dstChainId", "421614"))
            .and(query_param("amount", "1000000"))
            .and(query_param("slippage", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tx": { "to": "0x2b2c81e08f1af8835a78bb2a90ae924ace0ea4be", "data": "0x01", "value": "0", "chainId": 84532 },
                "amountOut": { "amount": "99" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let route = client(&server, Some("secret")).get_action(&request()).await?.into_route()?;
        assert_eq!(route.tx.chain_id, Some(84532));
        assert_eq!(route.route_metadata["amountOut"]["amount"], "99");
        Ok(())
    }

    #[tokio::test]
    async fn test_get_action_embedded_error() -> eyre::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getAction"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": { "code": 401, "name": "ApiError", "message": "API Key is invalid." }
            })))
            .mount(&server)
            .await;

        let response = client(&server, Some("bad")).get_action(&request()).await?;
        assert!(matches!(response, AggregatorResponse::Error(ref e) if e.code == 401));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_action_unparseable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getAction"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let err = client(&server, Some("secret")).get_action(&request()).await.unwrap_err();
        assert!(matches!(err, AggregatorClientError::ResponseSerdeJson { status: 502, .. }));
        assert!(matches!(SwapError::from(err), SwapError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_missing_api_key_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

        let err = client(&server, None).get_action(&request()).await.unwrap_err();
        assert!(matches!(SwapError::from(err), SwapError::Config(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/getAction"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = AggregatorClient::new(Url::parse(&server.uri()).unwrap(), Some("k".to_string()), Duration::from_millis(100));
        let err = client.get_action(&request()).await.unwrap_err();
        assert!(SwapError::from(err).is_timeout());
    }

    #[test]
    fn test_action_url_keeps_base_path() {
        let client = AggregatorClient::new(Url::parse("https://example.com/v2").unwrap(), None, Duration::from_secs(1));
        let url = client.action_url(&request()).unwrap();
        assert_eq!(url.path(), "/v2/api/getAction");
        assert_eq!(url.query_pairs().count(), 10);
    }
}
