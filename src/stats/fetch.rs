use super::types::RawSnapshot;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::utils::block_on;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Where a run gets its raw stats body from
pub trait StatsSource {
    fn fetch(&self) -> Result<RawSnapshot>;

    /// Human readable origin for log lines
    fn describe(&self) -> String;
}

/// Unauthenticated GET against the stats endpoint
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_async(&self) -> Result<Vec<u8>> {
        let fetch_err = |source| Error::Fetch {
            url: self.url.clone(),
            source,
        };

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("hordestats/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(fetch_err)?;

        let response = client.get(&self.url).send().await.map_err(fetch_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(fetch_err)?;
        Ok(body.to_vec())
    }
}

impl StatsSource for HttpSource {
    fn fetch(&self) -> Result<RawSnapshot> {
        tracing::info!(url = %self.url, "Fetching usage data");

        let body = block_on(self.fetch_async())??;

        tracing::debug!(bytes = body.len(), "Received stats response");
        Ok(RawSnapshot::new(body, self.url.clone()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Previously saved snapshot, used to rebuild tables offline
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StatsSource for SnapshotSource {
    fn fetch(&self) -> Result<RawSnapshot> {
        tracing::info!(path = %self.path.display(), "Reading saved snapshot");

        let body = fs::read(&self.path)?;
        let mut snapshot = RawSnapshot::new(body, self.path.display().to_string());

        if let Ok(modified) = fs::metadata(&self.path).and_then(|m| m.modified()) {
            snapshot.fetched_at = modified.into();
        }

        Ok(snapshot)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.api_url = "http://localhost:9/stats".to_string();
        config.timeout_secs = 7;

        let source = HttpSource::from_config(&config);
        assert_eq!(source.url(), "http://localhost:9/stats");
        assert_eq!(source.timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_snapshot_source_reads_bytes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("RawModelUsageData.json");
        fs::write(&path, b"{\"day\": {}}\n").unwrap();

        let snapshot = SnapshotSource::new(&path).fetch().unwrap();
        assert_eq!(snapshot.body, b"{\"day\": {}}\n");
        assert_eq!(snapshot.origin, path.display().to_string());
    }

    #[test]
    fn test_snapshot_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SnapshotSource::new(dir.path().join("absent.json")).fetch();
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_unreachable_host_is_fetch_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let source = HttpSource::new("http://127.0.0.1:9/stats", Duration::from_secs(2));
        let result = source.fetch();
        assert!(matches!(
            result,
            Err(Error::Fetch { .. }) | Err(Error::HttpStatus { .. })
        ));
    }
}
