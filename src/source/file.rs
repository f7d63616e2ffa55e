use super::{ReportSource, SourceError, parse_body};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Report body saved as JSON on disk. The path `-` reads stdin.
#[derive(Debug, Clone)]
pub struct FileReportSource {
    path: PathBuf,
}

impl FileReportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }

    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        if self.is_stdin() {
            let mut buf = Vec::new();
            tokio::io::stdin().read_to_end(&mut buf).await?;
            Ok(buf)
        } else {
            tokio::fs::read(&self.path).await
        }
    }
}

impl ReportSource for FileReportSource {
    fn origin(&self) -> String {
        if self.is_stdin() {
            "<stdin>".to_string()
        } else {
            self.path.display().to_string()
        }
    }

    async fn fetch(&self) -> Result<Value, SourceError> {
        let origin = self.origin();
        let bytes = self.read_bytes().await.map_err(|source| SourceError::Io {
            path: origin.clone(),
            source,
        })?;
        debug!(origin = %origin, bytes = bytes.len(), "Read report file");
        parse_body(&origin, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        fs::write(&path, r#"{"ml_results": [], "mobsf_report": {"score": 50}}"#).unwrap();

        let body = FileReportSource::new(&path).fetch().await.unwrap();
        assert_eq!(body["mobsf_report"]["score"], 50);
    }

    #[tokio::test]
    async fn test_missing_file_is_transport_error() {
        let dir = TempDir::new().unwrap();
        let err = FileReportSource::new(dir.path().join("missing.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"ml_results\": [").unwrap();

        let err = FileReportSource::new(&path).fetch().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_stdin_origin() {
        assert_eq!(FileReportSource::new("-").origin(), "<stdin>");
    }
}
