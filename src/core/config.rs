//! Configuration structures for build-publisher
//!
//! One process-wide settings object shared by every invocation. The fields
//! are plain scalars with static defaults; no schema validation is performed
//! here. File and environment overrides are merged by
//! [`crate::core::config_loader::ConfigLoader`].

use secrecy::SecretString;
use semver::Version;
use serde::Deserialize;
use std::path::PathBuf;

/// Process-wide publisher settings.
///
/// Constructed once at host startup and handed to the orchestrator as part of
/// its context; invocations read it, never write it.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Credential for the publish destination.
    pub username: String,

    /// Credential for the publish destination, held redacted in memory.
    pub password: SecretString,

    /// Remote destination the publish transport ships to.
    pub remote_url: String,

    /// Local staging directory on the publishing machine.
    pub local_dir: PathBuf,

    /// Version stamped on the published output.
    pub current_version: Version,

    /// Unique name of the project to build and publish, as the host
    /// environment identifies it.
    pub project_unique_name: String,

    /// Named build configuration, e.g. "Release".
    pub configuration_name: String,

    /// Platform target the configuration is paired with, e.g. "Any CPU".
    pub platform_target: String,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            username: "publisher".to_string(),
            password: SecretString::from(String::new()),
            remote_url: "http://127.0.0.1/publish/".to_string(),
            local_dir: PathBuf::from("."),
            current_version: Version::new(0, 1, 0),
            project_unique_name: String::new(),
            configuration_name: "Release".to_string(),
            platform_target: "Any CPU".to_string(),
        }
    }
}

/// Partial settings parsed from a configuration file.
///
/// Every field is optional; present fields replace the corresponding default
/// when applied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverlay {
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub remote_url: Option<String>,
    pub local_dir: Option<PathBuf>,
    pub current_version: Option<Version>,
    pub project_unique_name: Option<String>,
    pub configuration_name: Option<String>,
    pub platform_target: Option<String>,
}

impl PublisherConfig {
    /// Apply a partial overlay on top of the current values.
    pub fn apply(&mut self, overlay: ConfigOverlay) {
        if let Some(username) = overlay.username {
            self.username = username;
        }
        if let Some(password) = overlay.password {
            self.password = password;
        }
        if let Some(remote_url) = overlay.remote_url {
            self.remote_url = remote_url;
        }
        if let Some(local_dir) = overlay.local_dir {
            self.local_dir = local_dir;
        }
        if let Some(current_version) = overlay.current_version {
            self.current_version = current_version;
        }
        if let Some(project_unique_name) = overlay.project_unique_name {
            self.project_unique_name = project_unique_name;
        }
        if let Some(configuration_name) = overlay.configuration_name {
            self.configuration_name = configuration_name;
        }
        if let Some(platform_target) = overlay.platform_target {
            self.platform_target = platform_target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_config() {
        let config = PublisherConfig::default();

        assert_eq!(config.configuration_name, "Release");
        assert_eq!(config.platform_target, "Any CPU");
        assert_eq!(config.current_version, Version::new(0, 1, 0));
        assert!(config.project_unique_name.is_empty());
    }

    #[test]
    fn test_password_is_redacted_in_debug_output() {
        let mut config = PublisherConfig::default();
        config.password = SecretString::from("hunter2".to_string());

        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_apply_overlay_replaces_present_fields_only() {
        let mut config = PublisherConfig::default();
        let overlay = ConfigOverlay {
            project_unique_name: Some("App/App.csproj".to_string()),
            configuration_name: Some("Debug".to_string()),
            ..ConfigOverlay::default()
        };

        config.apply(overlay);

        assert_eq!(config.project_unique_name, "App/App.csproj");
        assert_eq!(config.configuration_name, "Debug");
        assert_eq!(config.platform_target, "Any CPU");
    }

    #[test]
    fn test_deserialize_overlay_from_yaml() {
        let yaml = r#"
username: deploy
password: s3cret
remoteUrl: "https://releases.example.com/drop/"
projectUniqueName: "ConsoleApp1/ConsoleApp1.csproj"
currentVersion: "3.0.17"
"#;
        let overlay: ConfigOverlay = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(overlay.username.as_deref(), Some("deploy"));
        assert_eq!(
            overlay.password.as_ref().map(|p| p.expose_secret()),
            Some("s3cret")
        );
        assert_eq!(overlay.current_version, Some(Version::new(3, 0, 17)));
        assert!(overlay.platform_target.is_none());
    }
}
