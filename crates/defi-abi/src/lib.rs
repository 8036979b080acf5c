pub use erc20::IERC20;

mod erc20;
