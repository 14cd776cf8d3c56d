use crate::domain::amount::ReconciliationNonce;
use crate::domain::ports::EntropySource;
use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Draws from the thread-local RNG on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngEntropy;

impl EntropySource for ThreadRngEntropy {
    fn nonce(&self) -> ReconciliationNonce {
        let value = rand::thread_rng().gen_range(0..=ReconciliationNonce::MAX);
        ReconciliationNonce::new(value).unwrap_or_default()
    }

    fn alphanumeric(&self, len: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..len)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

/// Deterministic entropy for tests and reproducible runs.
///
/// The suffix is repeated or cut to the requested length.
#[derive(Debug, Clone)]
pub struct FixedEntropy {
    nonce: ReconciliationNonce,
    suffix: String,
}

impl FixedEntropy {
    /// Nonce values above 999 are clamped.
    pub fn new(nonce: u16, suffix: impl Into<String>) -> Self {
        Self {
            nonce: ReconciliationNonce::new(nonce.min(ReconciliationNonce::MAX)).unwrap_or_default(),
            suffix: suffix.into(),
        }
    }
}

impl EntropySource for FixedEntropy {
    fn nonce(&self) -> ReconciliationNonce {
        self.nonce
    }

    fn alphanumeric(&self, len: usize) -> String {
        self.suffix.chars().cycle().take(len).collect()
    }
}
