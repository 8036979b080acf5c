use alloy_primitives::TxHash;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::serde_helpers::i64_lenient;
use crate::{SwapError, UnsignedTransaction};

/// Error payload the aggregator embeds in an HTTP 200 body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorError {
    #[serde(default, deserialize_with = "i64_lenient::deserialize")]
    pub code: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Executable route: the transaction to sign plus whatever else the aggregator reported
/// (fees, amounts, bridge details).
#[derive(Clone, Debug, PartialEq)]
pub struct RouteResult {
    pub tx: UnsignedTransaction,
    pub route_metadata: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AggregatorResponse {
    Route(RouteResult),
    Error(AggregatorError),
}

impl AggregatorResponse {
    pub fn from_value(value: Value) -> Result<Self, SwapError> {
        let Value::Object(mut fields) = value else {
            return Err(SwapError::Upstream("aggregator response is not a JSON object".to_string()));
        };

        match fields.get("error") {
            Some(Value::Object(_)) => {
                let error = fields.remove("error").unwrap_or_default();
                let error: AggregatorError =
                    serde_json::from_value(error).map_err(|e| SwapError::Upstream(format!("cannot parse aggregator error: {e}")))?;
                return Ok(AggregatorResponse::Error(error));
            }
            Some(Value::String(message)) => {
                return Ok(AggregatorResponse::Error(AggregatorError { code: 0, name: None, message: message.clone() }));
            }
            _ => {}
        }

        if fields.get("success") == Some(&Value::Bool(false)) {
            return Ok(AggregatorResponse::Error(AggregatorError {
                code: 0,
                name: None,
                message: "aggregator reported failure".to_string(),
            }));
        }

        let tx = fields.remove("tx").ok_or_else(|| SwapError::Upstream("aggregator response has no tx".to_string()))?;
        let tx: UnsignedTransaction = serde_json::from_value(tx).map_err(|e| SwapError::Upstream(format!("cannot parse tx: {e}")))?;

        Ok(AggregatorResponse::Route(RouteResult { tx, route_metadata: fields }))
    }

    pub fn into_route(self) -> Result<RouteResult, SwapError> {
        match self {
            AggregatorResponse::Route(route) => Ok(route),
            AggregatorResponse::Error(e) => Err(SwapError::Aggregator { code: e.code, message: e.message }),
        }
    }
}

/// Outcome of a broadcast swap. Route metadata is flattened next to the transaction fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResult {
    pub tx_hash: TxHash,
    pub tx: UnsignedTransaction,
    pub gas: u64,
    #[serde(flatten)]
    pub route_metadata: Map<String, Value>,
}
