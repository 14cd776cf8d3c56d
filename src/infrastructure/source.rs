use crate::domain::ports::{StaticPayloadSource, StaticPayloadSourceBox};
use crate::error::{QrisError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::OnceCell;
use tracing::info;

/// Reads the static payload text from a file, e.g. the output of a QR decoder.
///
/// Surrounding whitespace (a trailing newline) is trimmed.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StaticPayloadSource for FileSource {
    async fn load(&self) -> Result<String> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(QrisError::SourceError(format!(
                "{} contains no payload",
                self.path.display()
            )));
        }
        Ok(text.to_string())
    }
}

/// A static payload already held in memory.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    payload: String,
}

impl InMemorySource {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

#[async_trait]
impl StaticPayloadSource for InMemorySource {
    async fn load(&self) -> Result<String> {
        Ok(self.payload.clone())
    }
}

/// Caller-owned cache of the unmodified static payload.
///
/// The inner source is consulted once; a failed load is not cached, so the
/// next call retries.
pub struct CachedSource {
    inner: StaticPayloadSourceBox,
    cached: OnceCell<String>,
}

impl CachedSource {
    pub fn new(inner: StaticPayloadSourceBox) -> Self {
        Self {
            inner,
            cached: OnceCell::new(),
        }
    }

    pub async fn load(&self) -> Result<&str> {
        let payload = self
            .cached
            .get_or_try_init(|| async {
                let payload = self.inner.load().await?;
                info!("Loaded static payload ({} characters)", payload.chars().count());
                Ok::<_, QrisError>(payload)
            })
            .await?;
        Ok(payload.as_str())
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.initialized()
    }
}
