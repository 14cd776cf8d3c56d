use crate::domain::amount::{FinalAmount, ReconciliationNonce};
use crate::domain::anchor::{self, Initiation};
use crate::domain::checksum;
use crate::domain::ports::EntropyRef;
use crate::domain::tlv::{self, Payload, TAG_AMOUNT};
use crate::error::Result;
use tracing::{debug, warn};

/// A sealed dynamic payload together with the amount it embeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicPayload {
    pub payload: String,
    pub nonce: ReconciliationNonce,
    pub final_amount: FinalAmount,
}

impl DynamicPayload {
    pub fn as_str(&self) -> &str {
        &self.payload
    }

    pub fn into_string(self) -> String {
        self.payload
    }
}

/// Turns a merchant's static QRIS payload into a single-use dynamic one.
///
/// Holds no state besides the entropy source, so one instance can serve
/// concurrent callers.
#[derive(Clone)]
pub struct DynamicPayloadTransformer {
    entropy: EntropyRef,
}

impl DynamicPayloadTransformer {
    pub fn new(entropy: EntropyRef) -> Self {
        Self { entropy }
    }

    /// Embeds `bill_amount` plus a fresh reconciliation nonce.
    ///
    /// The nonce is drawn only once the payload has passed structural checks.
    pub fn transform(&self, static_payload: &str, bill_amount: i64) -> Result<DynamicPayload> {
        self.transform_inner(static_payload, bill_amount, || self.entropy.nonce())
    }

    /// Same as [`transform`](Self::transform) with a caller-chosen nonce.
    pub fn transform_with_nonce(
        &self,
        static_payload: &str,
        bill_amount: i64,
        nonce: ReconciliationNonce,
    ) -> Result<DynamicPayload> {
        self.transform_inner(static_payload, bill_amount, || nonce)
    }

    fn transform_inner(
        &self,
        static_payload: &str,
        bill_amount: i64,
        draw_nonce: impl FnOnce() -> ReconciliationNonce,
    ) -> Result<DynamicPayload> {
        let body = tlv::strip_checksum(static_payload)?;
        if let Err(e) = checksum::verify_checksum(static_payload) {
            warn!("Static payload checksum does not verify: {}", e);
        }

        let mut payload = Payload::parse(body)?;

        match anchor::mark_dynamic(&mut payload)? {
            Initiation::Marked | Initiation::AlreadyDynamic => {}
            Initiation::Unexpected(value) => {
                warn!(
                    "Point-of-initiation field has unexpected value {:?}, passing through",
                    value
                );
            }
            Initiation::Missing => {
                warn!("Point-of-initiation field not found, passing through");
            }
        }

        let anchor_index = anchor::locate_country_code(&payload)?.index;

        let nonce = draw_nonce();
        let final_amount = FinalAmount::new(bill_amount, nonce)?;
        let amount_field = final_amount.to_field()?;

        // A zero or placeholder amount already in the static code is overwritten.
        if !payload.set_value(TAG_AMOUNT, amount_field.value())? {
            payload.insert(anchor_index, amount_field);
        }

        let sealed = payload.seal();
        debug!(
            "Issued dynamic payload: bill={}, nonce={}, final={}",
            bill_amount, nonce, final_amount
        );

        Ok(DynamicPayload {
            payload: sealed,
            nonce,
            final_amount,
        })
    }
}
