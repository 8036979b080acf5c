pub mod error;
pub mod quote;
