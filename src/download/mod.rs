//! Media transfer and retry policy

pub mod retry;
pub mod transfer;

pub use retry::{RetryConfig, RetryExecutor};
pub use transfer::{HttpTransfer, ProgressCallback, Transfer};
