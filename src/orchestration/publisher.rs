//! Publish orchestrator
//!
//! The command handler behind the host's "build and publish" action. One
//! invocation forces a rebuild of the configured project, inspects the build
//! result, hands the output directory to the publish transport and reports
//! the outcome in a single dialog, driving the status overlay through every
//! phase. Invocations are serialized; the overlay is always returned to
//! hidden and non-animating on every exit path.

use crate::core::config::PublisherConfig;
use crate::core::error::PublishError;
use crate::core::traits::{
    BuildHost, BuildOutcome, DialogPresenter, DialogSeverity, PublishTransport,
};
use crate::orchestration::cancel::CancelToken;
use crate::status::overlay::StatusOverlay;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

const BUILDING_TEXT: &str = "Building…";
const PUBLISHING_TEXT: &str = "Publishing…";

const SUCCESS_DIALOG_MESSAGE: &str = "Publishing is complete";
const SUCCESS_DIALOG_TITLE: &str = "Publish succeeded";
const FAILURE_DIALOG_TITLE: &str = "Publish failed";

/// How long a final overlay message stays readable before the overlay is
/// collapsed.
const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(1000);

/// Everything one invocation resolved before building: the target project
/// and where its output will land. Derived from the configuration store and
/// live project state at invocation time; never persisted.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub invocation: Uuid,
    pub project_unique_name: String,
    pub configuration_name: String,
    pub platform_target: String,
    pub output_dir: PathBuf,
}

/// Report returned after a successful invocation.
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub invocation: Uuid,
    pub project: String,
    pub configuration: String,
    pub platform: String,
    pub output_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

/// The build-and-publish command handler.
///
/// Constructed once at host startup from an explicit context: configuration,
/// overlay handle and the three collaborator seams. Lives as long as the host
/// window; each user action calls [`PublishOrchestrator::execute_publish`].
pub struct PublishOrchestrator {
    config: PublisherConfig,
    overlay: StatusOverlay,
    host: Arc<dyn BuildHost>,
    transport: Arc<dyn PublishTransport>,
    dialogs: Arc<dyn DialogPresenter>,
    cancel: CancelToken,
    gate: Mutex<()>,
    hide_delay: Duration,
}

impl PublishOrchestrator {
    pub fn new(
        config: PublisherConfig,
        overlay: StatusOverlay,
        host: Arc<dyn BuildHost>,
        transport: Arc<dyn PublishTransport>,
        dialogs: Arc<dyn DialogPresenter>,
    ) -> Self {
        Self {
            config,
            overlay,
            host,
            transport,
            dialogs,
            cancel: CancelToken::new(),
            gate: Mutex::new(()),
            hide_delay: DEFAULT_HIDE_DELAY,
        }
    }

    /// Override the overlay hide delay.
    pub fn with_hide_delay(mut self, delay: Duration) -> Self {
        self.hide_delay = delay;
        self
    }

    /// Token observed by the build and publish awaits. Never fired by the
    /// orchestrator itself.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run one build-and-publish invocation.
    ///
    /// Triggers a real forced build and a real publish; neither is
    /// idempotent. A second call while one invocation is in flight queues
    /// behind it. Exactly one dialog is shown per invocation, and the
    /// overlay is hidden again on every path out of the sequence.
    pub async fn execute_publish(&self) -> Result<PublishReport, PublishError> {
        let _gate = self.gate.lock().await;

        let invocation = Uuid::new_v4();
        let started_at = Utc::now();
        let timer = Instant::now();

        self.overlay.show(BUILDING_TEXT).await;
        self.overlay.set_animating(true).await;

        let outcome = self.run_sequence(invocation, started_at, timer).await;

        // Single release site for the overlay, regardless of which exit the
        // sequence took.
        self.overlay.set_animating(false).await;
        self.overlay.hide(self.hide_delay).await;

        match &outcome {
            Ok(report) => {
                tracing::info!(
                    invocation = %invocation,
                    duration_ms = report.duration_ms,
                    "publish invocation succeeded"
                );
                self.dialogs.show_dialog(
                    SUCCESS_DIALOG_MESSAGE,
                    SUCCESS_DIALOG_TITLE,
                    DialogSeverity::Info,
                );
            }
            Err(error) => {
                tracing::error!(
                    invocation = %invocation,
                    code = error.code(),
                    "publish invocation failed: {error}"
                );
                self.dialogs.show_dialog(
                    &format!(
                        "Publish has encountered an error.\nPublishing failed.\n\n{error}"
                    ),
                    FAILURE_DIALOG_TITLE,
                    DialogSeverity::Critical,
                );
            }
        }

        outcome
    }

    /// The fallible part of an invocation. Every early return funnels back
    /// through the overlay release in [`PublishOrchestrator::execute_publish`].
    async fn run_sequence(
        &self,
        invocation: Uuid,
        started_at: DateTime<Utc>,
        timer: Instant,
    ) -> Result<PublishReport, PublishError> {
        let config = &self.config;

        let project = self
            .host
            .find_project_by_unique_name(&config.project_unique_name)
            .await
            .ok_or_else(|| PublishError::ProjectNotFound {
                name: config.project_unique_name.clone(),
            })?;

        let relative_output = self
            .host
            .configuration_output_path(
                &project,
                &config.configuration_name,
                &config.platform_target,
            )
            .await
            .map_err(|e| PublishError::BuildFailed {
                message: format!("could not resolve the build output path: {e:#}"),
            })?;

        let request = PublishRequest {
            invocation,
            project_unique_name: project.unique_name.clone(),
            configuration_name: config.configuration_name.clone(),
            platform_target: config.platform_target.clone(),
            output_dir: project.directory.join(relative_output),
        };

        let short_name = short_project_name(&request.project_unique_name);
        let configuration = &request.configuration_name;
        let platform = &request.platform_target;

        tracing::info!(
            "------ Build started: Project: {short_name}, Configuration: {configuration} {platform} ------"
        );

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                return Err(PublishError::BuildFailed {
                    message: "the build was cancelled".to_string(),
                });
            }
            result = self.host.build_project(
                &request.configuration_name,
                &request.project_unique_name,
                true,
            ) => {
                result.map_err(|e| PublishError::BuildFailed {
                    message: format!("build service error: {e:#}"),
                })?;
            }
        }

        let build_done = self.host.is_build_done().await;
        let failed_projects = self.host.failed_project_count().await;
        if BuildOutcome::classify(build_done, failed_projects) == BuildOutcome::Failed {
            tracing::info!(
                "========== Build: 0 succeeded, 1 failed, 0 up-to-date, 0 skipped =========="
            );
            tracing::info!("========== Publish: 0 succeeded, 0 failed, 1 skipped ==========");
            return Err(PublishError::BuildFailed {
                message: "Build failed. Check the output window for more details.".to_string(),
            });
        }

        tracing::info!(
            "========== Build: 1 succeeded, 0 failed, 0 up-to-date, 0 skipped =========="
        );

        self.overlay.show(PUBLISHING_TEXT).await;
        tracing::info!(
            "------ Publish started: Project: {short_name}, Configuration: {configuration} {platform} ------"
        );

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                return Err(PublishError::PublishFailed {
                    message: "the publish was cancelled".to_string(),
                });
            }
            result = self.transport.publish(&request.output_dir) => {
                result.map_err(|e| PublishError::PublishFailed {
                    message: format!("{e:#}"),
                })?;
            }
        }

        tracing::info!("========== Publish: 1 succeeded, 0 failed, 0 skipped ==========");

        Ok(PublishReport {
            invocation,
            project: request.project_unique_name,
            configuration: request.configuration_name,
            platform: request.platform_target,
            output_dir: request.output_dir,
            started_at,
            duration_ms: timer.elapsed().as_millis() as u64,
        })
    }
}

/// Short display name of a project unique name, tolerating both path
/// separator styles the host may use.
fn short_project_name(unique_name: &str) -> &str {
    let file = unique_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(unique_name);
    match file.rfind('.') {
        Some(0) | None => file,
        Some(idx) => &file[..idx],
    }
}
