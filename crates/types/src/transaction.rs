use alloy_primitives::{Address, Bytes, TxKind, U256};
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::serde_helpers::{u256_lenient, u64_lenient_opt};
use crate::ChainId;

/// Unsigned transaction handed out by the aggregator.
///
/// Only the fields needed to estimate and sign are typed; everything else the aggregator
/// sent is kept in `extra` and written back unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    #[serde(default, alias = "input")]
    pub data: Bytes,
    #[serde(default, with = "u256_lenient")]
    pub value: U256,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "u64_lenient_opt")]
    pub chain_id: Option<ChainId>,
    #[serde(default, alias = "gasLimit", skip_serializing_if = "Option::is_none", with = "u64_lenient_opt")]
    pub gas: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UnsignedTransaction {
    /// Chain the transaction targets, or `fallback` when the aggregator left it out.
    pub fn chain_id_or(&self, fallback: ChainId) -> ChainId {
        self.chain_id.unwrap_or(fallback)
    }

    pub fn with_gas(self, gas: u64) -> Self {
        Self { gas: Some(gas), ..self }
    }

    pub fn to_transaction_request(&self, from: Address, chain_id: ChainId) -> TransactionRequest {
        TransactionRequest {
            from: Some(from),
            to: Some(TxKind::Call(self.to)),
            value: Some(self.value),
            input: TransactionInput::new(self.data.clone()),
            chain_id: Some(chain_id),
            gas: self.gas,
            ..TransactionRequest::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use serde_json::json;

    #[test]
    fn test_deserialize_mixed_encodings() -> eyre::Result<()> {
        let tx: UnsignedTransaction = serde_json::from_value(json!({
            "to": "0x2b2c81e08f1af8835a78bb2a90ae924ace0ea4be",
            "data": "0xdeadbeef",
            "value": "1000",
            "chainId": 84532,
            "gasLimit": "0x5208",
            "maxFeePerGas": "0x1"
        }))?;
        assert_eq!(tx.to, address!("2b2C81e08f1Af8835a78Bb2A90AE924ACE0eA4bE"));
        assert_eq!(tx.data.as_ref(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(tx.value, U256::from(1000));
        assert_eq!(tx.chain_id, Some(84532));
        assert_eq!(tx.gas, Some(21000));
        assert_eq!(tx.extra.get("maxFeePerGas"), Some(&json!("0x1")));
        Ok(())
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() -> eyre::Result<()> {
        let tx: UnsignedTransaction = serde_json::from_value(json!({
            "to": "0x2b2c81e08f1af8835a78bb2a90ae924ace0ea4be",
            "value": 7,
            "routeTag": "across"
        }))?;
        let value = serde_json::to_value(tx.with_gas(50_000))?;
        assert_eq!(value["routeTag"], "across");
        assert_eq!(value["value"], "7");
        assert_eq!(value["gas"], 50_000);
        assert!(value.get("chainId").is_none());
        Ok(())
    }

    #[test]
    fn test_transaction_request() {
        let tx = UnsignedTransaction {
            to: address!("2b2C81e08f1Af8835a78Bb2A90AE924ACE0eA4bE"),
            value: U256::from(5),
            ..UnsignedTransaction::default()
        };
        let from = address!("108e41248841d0c0d2303222324fF21C3ca88d73");
        let req = tx.to_transaction_request(from, tx.chain_id_or(421614));
        assert_eq!(req.from, Some(from));
        assert_eq!(req.to, Some(TxKind::Call(tx.to)));
        assert_eq!(req.chain_id, Some(421614));
        assert_eq!(req.gas, None);
    }
}
