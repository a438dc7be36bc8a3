//! Error handling for the build-and-publish command
//!
//! A single tagged error type replaces exception-style control flow: the
//! orchestrator's sequence returns `Result<_, PublishError>` and the dialog
//! step pattern-matches on the outcome.

use thiserror::Error;

/// Fatal outcomes of one publish invocation.
///
/// Every variant aborts the invocation; there is no recoverable class and no
/// retry. Overlay update failures are intentionally absent: they are swallowed
/// and logged at the status-overlay boundary and never surface here.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The configured project unique name matched none of the host's open
    /// projects.
    #[error("project '{name}' was not found among the host's open projects")]
    ProjectNotFound { name: String },

    /// The build service reported a non-done state, a non-zero failed-project
    /// count, or faulted while building or resolving the output path.
    #[error("{message}")]
    BuildFailed { message: String },

    /// The publish transport raised; the underlying message is carried
    /// verbatim so the failure dialog can show it.
    #[error("publishing failed: {message}")]
    PublishFailed { message: String },

    /// The configuration overlay file was unreadable or unparsable. Raised by
    /// the loader at startup, never by `execute_publish`.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl PublishError {
    /// Stable error code for log correlation.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProjectNotFound { .. } => "PROJECT_NOT_FOUND",
            Self::BuildFailed { .. } => "BUILD_FAILED",
            Self::PublishFailed { .. } => "PUBLISH_FAILED",
            Self::Config { .. } => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_not_found_display_names_the_project() {
        let error = PublishError::ProjectNotFound {
            name: "ConsoleApp1/ConsoleApp1.csproj".to_string(),
        };

        assert!(error.to_string().contains("ConsoleApp1/ConsoleApp1.csproj"));
        assert_eq!(error.code(), "PROJECT_NOT_FOUND");
    }

    #[test]
    fn test_build_failed_carries_message_verbatim() {
        let error = PublishError::BuildFailed {
            message: "Build failed. Check the output window for more details.".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Build failed. Check the output window for more details."
        );
        assert_eq!(error.code(), "BUILD_FAILED");
    }

    #[test]
    fn test_publish_failed_includes_transport_message() {
        let error = PublishError::PublishFailed {
            message: "connection refused".to_string(),
        };

        assert!(error.to_string().contains("connection refused"));
        assert_eq!(error.code(), "PUBLISH_FAILED");
    }

    #[test]
    fn test_config_error_code() {
        let error = PublishError::Config {
            message: "bad yaml".to_string(),
        };

        assert_eq!(error.code(), "CONFIG_ERROR");
        assert!(error.to_string().contains("bad yaml"));
    }
}
