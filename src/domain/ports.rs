use super::amount::ReconciliationNonce;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Randomness consumed by the transformer and the identifier generator.
pub trait EntropySource: Send + Sync {
    /// Uniform draw in `0..=999`.
    fn nonce(&self) -> ReconciliationNonce;
    /// `len` characters from `[0-9a-z]`.
    fn alphanumeric(&self, len: usize) -> String;
}

pub trait Clock: Send + Sync {
    /// Wall-clock time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Where the merchant's static payload text comes from.
#[async_trait]
pub trait StaticPayloadSource: Send + Sync {
    async fn load(&self) -> Result<String>;
}

pub type EntropyRef = Arc<dyn EntropySource>;
pub type ClockRef = Arc<dyn Clock>;
pub type StaticPayloadSourceBox = Box<dyn StaticPayloadSource>;
