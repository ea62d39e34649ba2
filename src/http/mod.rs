//! HTTP client module
//!
//! The transport behind the REST listing provider. Timeout, retry and
//! rate-limit policy live here, never in the paginated loader.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
