pub mod client;
pub mod retry;

pub use client::{IndexClient, IndexError, SearchHit};
pub use retry::{retry_with_backoff, RetryPolicy};
