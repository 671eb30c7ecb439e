//! HTTP transport module
//!
//! Provides the [`Transport`] seam the paging layer pulls pages through,
//! and an HTTP implementation with retry, rate limiting, and backoff.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, Transport};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
