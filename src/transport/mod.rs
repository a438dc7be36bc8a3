//! Publish transports
//!
//! Concrete implementations of the [`crate::core::traits::PublishTransport`]
//! seam. The orchestrator only sees the trait; hosts may wire their own.

pub mod http;

pub use http::HttpPublishTransport;
