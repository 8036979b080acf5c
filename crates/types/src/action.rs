use std::fmt;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::u256_lenient;
use crate::{ChainId, SwapError};

pub const DEFAULT_SLIPPAGE_BPS: u32 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    #[default]
    #[serde(rename = "swap-action")]
    SwapAction,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::SwapAction => "swap-action",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapDirection {
    #[default]
    #[serde(rename = "exact-amount-in")]
    ExactAmountIn,
}

impl SwapDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapDirection::ExactAmountIn => "exact-amount-in",
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single swap/bridge action as understood by the aggregator `getAction` endpoint.
///
/// `amount` is denominated in the smallest units of `src_token`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapActionRequest {
    pub action_type: ActionType,
    pub sender: Address,
    pub src_token: Address,
    pub dst_token: Address,
    pub src_chain_id: ChainId,
    pub dst_chain_id: ChainId,
    #[serde(rename = "slippage")]
    pub slippage_bps: u32,
    pub swap_direction: SwapDirection,
    #[serde(with = "u256_lenient")]
    pub amount: U256,
    pub recipient: Address,
}

impl SwapActionRequest {
    /// Exact-in swap paying out to the sender, with the default slippage.
    pub fn exact_in(
        sender: Address,
        src_token: Address,
        src_chain_id: ChainId,
        dst_token: Address,
        dst_chain_id: ChainId,
        amount: U256,
    ) -> Self {
        Self {
            action_type: ActionType::SwapAction,
            sender,
            src_token,
            dst_token,
            src_chain_id,
            dst_chain_id,
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
            swap_direction: SwapDirection::ExactAmountIn,
            amount,
            recipient: sender,
        }
    }

    pub fn with_recipient(self, recipient: Address) -> Self {
        Self { recipient, ..self }
    }

    pub fn with_slippage_bps(self, slippage_bps: u32) -> Self {
        Self { slippage_bps, ..self }
    }

    /// Query parameters in the order the aggregator documents them. Every value is stringified.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("actionType", self.action_type.to_string()),
            ("sender", self.sender.to_string()),
            ("srcToken", self.src_token.to_string()),
            ("dstToken", self.dst_token.to_string()),
            ("srcChainId", self.src_chain_id.to_string()),
            ("dstChainId", self.dst_chain_id.to_string()),
            ("slippage", self.slippage_bps.to_string()),
            ("swapDirection", self.swap_direction.to_string()),
            ("amount", self.amount.to_string()),
            ("recipient", self.recipient.to_string()),
        ]
    }

    /// Checks a caller may run before broadcasting. `broadcast` itself does not call this.
    pub fn validate(&self) -> Result<(), SwapError> {
        if self.amount.is_zero() {
            return Err(SwapError::Validation("amount must be greater than zero".to_string()));
        }
        if self.src_chain_id == self.dst_chain_id {
            return Err(SwapError::Validation("source and destination chains must differ".to_string()));
        }
        Ok(())
    }
}
