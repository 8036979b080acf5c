pub use client::{AlloyEvmClient, EvmClient};
pub use orchestrator::{StepTimeouts, SwapOrchestrator};
pub use signer::{LocalTxSigner, SwapSigner};

mod client;
mod in_flight;
mod orchestrator;
mod signer;
