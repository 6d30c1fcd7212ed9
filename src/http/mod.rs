//! HTTP client layer: `RatesHttp`, one method per endpoint.

pub mod client;

pub use client::RatesHttp;
