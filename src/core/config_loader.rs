//! Configuration loader for build-publisher
//!
//! Merges settings from three sources, lowest to highest priority:
//! built-in defaults, a project-local YAML file, environment variables.

use crate::core::config::{ConfigOverlay, PublisherConfig};
use crate::core::error::PublishError;
use secrecy::SecretString;
use semver::Version;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Configuration file name, looked up in the project directory.
const CONFIG_FILENAME: &str = ".build-publisher.yaml";

/// Prefix shared by all recognized environment variables.
const ENV_PREFIX: &str = "BUILD_PUBLISHER_";

/// Configuration load options
#[derive(Debug, Clone, Default)]
pub struct ConfigLoadOptions {
    /// Directory holding the optional configuration file.
    pub project_path: PathBuf,

    /// Environment variables, injected so tests never touch the process
    /// environment.
    pub env: HashMap<String, String>,
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with defaults, file and environment merged in
    /// priority order.
    pub async fn load(options: ConfigLoadOptions) -> Result<PublisherConfig, PublishError> {
        let mut config = PublisherConfig::default();

        let file_path = options.project_path.join(CONFIG_FILENAME);
        if let Some(overlay) = Self::load_config_file(&file_path).await? {
            config.apply(overlay);
        }

        Self::apply_env(&mut config, &options.env)?;

        Ok(config)
    }

    /// Parse the YAML configuration file, if present.
    async fn load_config_file(path: &Path) -> Result<Option<ConfigOverlay>, PublishError> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(PublishError::Config {
                    message: format!("{}: {}", path.display(), e),
                });
            }
        };

        serde_yaml::from_str(&content)
            .map(Some)
            .map_err(|e| PublishError::Config {
                message: format!("{}: {}", path.display(), e),
            })
    }

    /// Overlay recognized `BUILD_PUBLISHER_*` variables onto the config.
    fn apply_env(
        config: &mut PublisherConfig,
        env: &HashMap<String, String>,
    ) -> Result<(), PublishError> {
        let var = |suffix: &str| env.get(&format!("{ENV_PREFIX}{suffix}")).cloned();

        if let Some(username) = var("USERNAME") {
            config.username = username;
        }
        if let Some(password) = var("PASSWORD") {
            config.password = SecretString::from(password);
        }
        if let Some(remote_url) = var("REMOTE_URL") {
            config.remote_url = remote_url;
        }
        if let Some(local_dir) = var("LOCAL_DIR") {
            config.local_dir = PathBuf::from(local_dir);
        }
        if let Some(version) = var("VERSION") {
            config.current_version =
                Version::parse(&version).map_err(|e| PublishError::Config {
                    message: format!("{ENV_PREFIX}VERSION '{version}': {e}"),
                })?;
        }
        if let Some(project) = var("PROJECT") {
            config.project_unique_name = project;
        }
        if let Some(configuration) = var("CONFIGURATION") {
            config.configuration_name = configuration;
        }
        if let Some(platform) = var("PLATFORM") {
            config.platform_target = platform;
        }

        Ok(())
    }
}
