//! HTTP publish transport
//!
//! Default implementation of the publish seam: every file under the build
//! output directory is uploaded to the configured remote URL with an
//! authenticated PUT, preserving the directory layout in the request path.

use crate::core::config::PublisherConfig;
use crate::core::traits::PublishTransport;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One file scheduled for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
struct UploadEntry {
    /// Absolute path on disk.
    path: PathBuf,

    /// Path relative to the output directory, forward-slash separated, used
    /// as the remote location.
    remote_path: String,
}

/// Publish transport shipping a directory tree over HTTP.
pub struct HttpPublishTransport {
    client: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
}

impl HttpPublishTransport {
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        password: SecretString,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid remote url '{base_url}'"))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            username: username.into(),
            password,
        })
    }

    pub fn from_config(config: &PublisherConfig) -> anyhow::Result<Self> {
        Self::new(
            &config.remote_url,
            config.username.clone(),
            config.password.clone(),
        )
    }
}

#[async_trait]
impl PublishTransport for HttpPublishTransport {
    async fn publish(&self, output_dir: &Path) -> anyhow::Result<()> {
        let metadata = tokio::fs::metadata(output_dir).await.with_context(|| {
            format!("build output directory {} is not readable", output_dir.display())
        })?;
        anyhow::ensure!(
            metadata.is_dir(),
            "build output path {} is not a directory",
            output_dir.display()
        );

        let scan_root = output_dir.to_path_buf();
        let entries = tokio::task::spawn_blocking(move || collect_upload_entries(&scan_root))
            .await
            .context("upload scan task failed")??;
        anyhow::ensure!(
            !entries.is_empty(),
            "build output directory {} contains no files",
            output_dir.display()
        );

        for entry in &entries {
            let url = self
                .base_url
                .join(&entry.remote_path)
                .with_context(|| format!("invalid remote path '{}'", entry.remote_path))?;
            let body = tokio::fs::read(&entry.path)
                .await
                .with_context(|| format!("could not read {}", entry.path.display()))?;

            tracing::debug!(remote = %url, bytes = body.len(), "uploading {}", entry.remote_path);

            self.client
                .put(url)
                .basic_auth(&self.username, Some(self.password.expose_secret()))
                .body(body)
                .send()
                .await
                .with_context(|| format!("upload of {} failed", entry.remote_path))?
                .error_for_status()
                .with_context(|| format!("upload of {} was rejected", entry.remote_path))?;
        }

        tracing::info!(
            files = entries.len(),
            "uploaded build output to {}",
            self.base_url
        );

        Ok(())
    }
}

/// Walk the output directory and list every file with its remote path.
/// Deterministic order so repeated publishes upload in the same sequence.
fn collect_upload_entries(output_dir: &Path) -> anyhow::Result<Vec<UploadEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(output_dir) {
        let entry = entry.with_context(|| {
            format!("could not walk build output under {}", output_dir.display())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(output_dir)
            .with_context(|| format!("unexpected path {}", entry.path().display()))?;
        let remote_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        entries.push(UploadEntry {
            path: entry.into_path(),
            remote_path,
        });
    }

    entries.sort_by(|a, b| a.remote_path.cmp(&b.remote_path));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collect_entries_lists_files_recursively() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "App.exe", "binary");
        touch(dir.path(), "lib/App.dll", "library");
        touch(dir.path(), "lib/deep/data.bin", "data");

        let entries = collect_upload_entries(dir.path()).unwrap();
        let remote: Vec<&str> = entries.iter().map(|e| e.remote_path.as_str()).collect();

        assert_eq!(remote, vec!["App.exe", "lib/App.dll", "lib/deep/data.bin"]);
    }

    #[test]
    fn test_collect_entries_skips_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("empty/nested")).unwrap();
        touch(dir.path(), "only.txt", "x");

        let entries = collect_upload_entries(dir.path()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].remote_path, "only.txt");
    }

    #[test]
    fn test_collect_entries_is_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "z.txt", "z");
        touch(dir.path(), "a.txt", "a");
        touch(dir.path(), "m/m.txt", "m");

        let entries = collect_upload_entries(dir.path()).unwrap();
        let remote: Vec<&str> = entries.iter().map(|e| e.remote_path.as_str()).collect();

        assert_eq!(remote, vec!["a.txt", "m/m.txt", "z.txt"]);
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = HttpPublishTransport::new(
            "not a url",
            "publisher",
            SecretString::from(String::new()),
        );

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_publish_fails_on_missing_directory() {
        let dir = TempDir::new().unwrap();
        let transport = HttpPublishTransport::new(
            "http://127.0.0.1/publish/",
            "publisher",
            SecretString::from(String::new()),
        )
        .unwrap();

        let err = transport
            .publish(&dir.path().join("does-not-exist"))
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("is not readable"));
    }

    #[tokio::test]
    async fn test_publish_fails_on_empty_directory() {
        let dir = TempDir::new().unwrap();
        let transport = HttpPublishTransport::new(
            "http://127.0.0.1/publish/",
            "publisher",
            SecretString::from(String::new()),
        )
        .unwrap();

        let err = transport.publish(dir.path()).await.unwrap_err();

        assert!(format!("{err:#}").contains("contains no files"));
    }

    #[test]
    fn test_from_config_uses_remote_url() {
        let mut config = PublisherConfig::default();
        config.remote_url = "https://releases.example.com/drop/".to_string();

        let transport = HttpPublishTransport::from_config(&config).unwrap();

        assert_eq!(
            transport.base_url.as_str(),
            "https://releases.example.com/drop/"
        );
    }
}
