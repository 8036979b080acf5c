//! HTTP clients for the third-party services a swap depends on.
//!
//! [`AggregatorClient`] resolves a [`SwapActionRequest`](defi_types::SwapActionRequest) into an
//! executable route through the aggregator `getAction` endpoint. [`QuoteClient`] fetches raw
//! price quotes and keeps the upstream response untouched so it can be relayed.
pub use aggregator::{AggregatorClient, AGGREGATOR_API_KEY_HEADER, DEFAULT_AGGREGATOR_URL};
pub use error::AggregatorClientError;
pub use quote::{QuoteClient, QuoteRequest, UpstreamResponse, DEFAULT_QUOTE_URL};

mod aggregator;
mod error;
mod quote;
