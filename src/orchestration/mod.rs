//! Orchestration layer for the build-and-publish command
//!
//! This module provides the command handler that sequences build invocation,
//! result inspection, publish invocation and status feedback.

pub mod cancel;
pub mod publisher;

pub use cancel::CancelToken;
pub use publisher::{PublishOrchestrator, PublishReport, PublishRequest};
