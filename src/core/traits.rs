//! Core traits and types for the build-and-publish command
//!
//! This module defines the seams between the orchestrator and the host
//! environment: the build service, the publish transport and the dialog
//! presenter. Production wiring hands the orchestrator host-backed
//! implementations; tests substitute doubles.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

// ============================================================================
// Build outcome
// ============================================================================

/// Result of inspecting the build service after a build call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Succeeded,
    Failed,
}

impl BuildOutcome {
    /// Classify the post-build queries: success requires a done build state
    /// and zero failed projects, anything else is a failure.
    pub fn classify(build_done: bool, failed_projects: u32) -> Self {
        if build_done && failed_projects == 0 {
            BuildOutcome::Succeeded
        } else {
            BuildOutcome::Failed
        }
    }
}

// ============================================================================
// Project resolution
// ============================================================================

/// A project resolved among the host's open projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectHandle {
    /// Unique name the host identifies the project by.
    pub unique_name: String,

    /// Directory the project file lives in; the configuration output path is
    /// resolved relative to it.
    pub directory: PathBuf,
}

// ============================================================================
// Build service
// ============================================================================

/// The host environment's project-build facility.
///
/// Build triggering and result inspection touch live host state; the provided
/// implementation is expected to marshal onto whatever thread the host
/// requires, the orchestrator only awaits the calls in strict order.
#[async_trait]
pub trait BuildHost: Send + Sync {
    /// Look up an open project by its unique name.
    async fn find_project_by_unique_name(&self, unique_name: &str) -> Option<ProjectHandle>;

    /// Resolve the output path of the named configuration/platform pair,
    /// relative to the project directory. Read from live project state, since
    /// the output path is project-defined and may change between builds.
    async fn configuration_output_path(
        &self,
        project: &ProjectHandle,
        configuration_name: &str,
        platform_target: &str,
    ) -> anyhow::Result<PathBuf>;

    /// Build the project in the named configuration. `force_rebuild` bypasses
    /// incremental-build skips so stale output is never published.
    async fn build_project(
        &self,
        configuration_name: &str,
        project_unique_name: &str,
        force_rebuild: bool,
    ) -> anyhow::Result<()>;

    /// Whether the last build run reached the done state.
    async fn is_build_done(&self) -> bool;

    /// Number of projects that failed in the last build run.
    async fn failed_project_count(&self) -> u32;
}

// ============================================================================
// Publish transport
// ============================================================================

/// External routine that ships a built output directory to the remote
/// destination. Its wire protocol is opaque to the orchestrator; only the
/// call contract matters.
#[async_trait]
pub trait PublishTransport: Send + Sync {
    async fn publish(&self, output_dir: &Path) -> anyhow::Result<()>;
}

// ============================================================================
// Dialog presenter
// ============================================================================

/// Severity of a result dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogSeverity {
    Info,
    Critical,
}

/// Host dialog surface. Used exactly once per invocation: a failure dialog on
/// any caught failure, otherwise a success dialog.
pub trait DialogPresenter: Send + Sync {
    fn show_dialog(&self, message: &str, title: &str, severity: DialogSeverity);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_done_and_clean_succeeds() {
        assert_eq!(BuildOutcome::classify(true, 0), BuildOutcome::Succeeded);
    }

    #[test]
    fn test_classify_not_done_fails() {
        assert_eq!(BuildOutcome::classify(false, 0), BuildOutcome::Failed);
    }

    #[test]
    fn test_classify_failed_projects_fail() {
        assert_eq!(BuildOutcome::classify(true, 1), BuildOutcome::Failed);
        assert_eq!(BuildOutcome::classify(false, 3), BuildOutcome::Failed);
    }

    #[test]
    fn test_project_handle_equality() {
        let a = ProjectHandle {
            unique_name: "App/App.csproj".to_string(),
            directory: PathBuf::from("/work/App"),
        };
        let b = a.clone();

        assert_eq!(a, b);
    }
}
