pub use address::{shorten_address, DEFAULT_SHORTEN_CHARS};
pub use chains::{chain_name, explorer_address_url, native_symbol, ChainDescriptor, SUPPORTED_CHAINS};
pub use units::{format_token_amount, format_units, parse_units, ParseAmountError};

mod address;
pub mod chains;
pub mod tokens;
mod units;
