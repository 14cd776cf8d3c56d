use crate::domain::ports::{ClockRef, EntropyRef};

pub const TRANSACTION_ID_PREFIX: &str = "TXN";
pub const SUFFIX_LEN: usize = 9;

/// Produces `TXN-<millis>-<suffix>` correlation strings for display and logs.
///
/// Not unique across processes; never use as an idempotency key.
#[derive(Clone)]
pub struct TransactionIdGenerator {
    clock: ClockRef,
    entropy: EntropyRef,
}

impl TransactionIdGenerator {
    pub fn new(clock: ClockRef, entropy: EntropyRef) -> Self {
        Self { clock, entropy }
    }

    pub fn generate(&self) -> String {
        format!(
            "{}-{}-{}",
            TRANSACTION_ID_PREFIX,
            self.clock.now_millis(),
            self.entropy.alphanumeric(SUFFIX_LEN)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, SystemClock};
    use crate::infrastructure::entropy::{FixedEntropy, ThreadRngEntropy};
    use std::sync::Arc;

    #[test]
    fn test_generate_with_fixed_sources() {
        let generator = TransactionIdGenerator::new(
            Arc::new(FixedClock::new(1_759_465_064_000)),
            Arc::new(FixedEntropy::new(0, "k3x9p0qz7")),
        );
        assert_eq!(generator.generate(), "TXN-1759465064000-k3x9p0qz7");
    }

    #[test]
    fn test_generate_with_system_sources() {
        let generator =
            TransactionIdGenerator::new(Arc::new(SystemClock), Arc::new(ThreadRngEntropy));
        let id = generator.generate();

        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "TXN");
        assert!(parts[1].parse::<i64>().unwrap() > 0);
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(
            parts[2]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }
}
