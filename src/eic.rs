//! Accepted EIC (Energy Identification Code) list
//!
//! Read once from a plain-text file, one code per line. The file is only
//! consulted while the in-memory list is empty.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::Mutex;

pub struct AcceptedEicCodes {
    path: PathBuf,
    codes: Mutex<Vec<String>>,
}

impl AcceptedEicCodes {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            codes: Mutex::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All accepted codes, loading the file on first use.
    ///
    /// A missing file yields an empty list and is retried on the next call.
    pub async fn codes(&self) -> Result<Vec<String>> {
        let mut codes = self.codes.lock().await;
        if codes.is_empty() {
            *codes = self.load().await?;
        }
        Ok(codes.clone())
    }

    pub async fn is_accepted(&self, code: &str) -> Result<bool> {
        let code = code.trim();
        Ok(self.codes().await?.iter().any(|c| c == code))
    }

    async fn load(&self) -> Result<Vec<String>> {
        let started = Instant::now();
        tracing::info!(path = %self.path.display(), "Loading accepted EIC codes");

        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "Accepted EIC code file not found");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read accepted EIC codes from {}", self.path.display())
                })
            }
        };

        let codes: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        tracing::info!(
            count = codes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Loaded accepted EIC codes"
        );
        Ok(codes)
    }
}

impl std::fmt::Debug for AcceptedEicCodes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcceptedEicCodes")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
