use crate::application::identifier::TransactionIdGenerator;
use crate::application::transformer::DynamicPayloadTransformer;
use crate::domain::amount::{ReconciliationNonce, to_base_units};
use crate::domain::payment::{Bill, PaymentRequest};
use crate::domain::ports::{ClockRef, EntropyRef, StaticPayloadSourceBox};
use crate::error::Result;
use crate::infrastructure::source::CachedSource;

/// Issues dynamic payment codes for bills.
///
/// `PaymentService` owns the static payload cache and hands the cached text to
/// the stateless transformer by value on every call.
pub struct PaymentService {
    source: CachedSource,
    transformer: DynamicPayloadTransformer,
    ids: TransactionIdGenerator,
}

impl PaymentService {
    /// Creates a new `PaymentService`.
    ///
    /// # Arguments
    ///
    /// * `source` - Where the merchant's static payload is loaded from, at most once.
    /// * `clock` - Time source for transaction identifiers.
    /// * `entropy` - Randomness for nonces and identifier suffixes.
    pub fn new(source: StaticPayloadSourceBox, clock: ClockRef, entropy: EntropyRef) -> Self {
        Self {
            source: CachedSource::new(source),
            transformer: DynamicPayloadTransformer::new(entropy.clone()),
            ids: TransactionIdGenerator::new(clock, entropy),
        }
    }

    /// Issues a payment request with a freshly drawn nonce.
    pub async fn issue(&self, bill: &Bill) -> Result<PaymentRequest> {
        self.issue_inner(bill, None).await
    }

    /// Issues a payment request with a pinned nonce, e.g. to re-issue a code
    /// whose final amount was already communicated.
    pub async fn issue_with_nonce(
        &self,
        bill: &Bill,
        nonce: ReconciliationNonce,
    ) -> Result<PaymentRequest> {
        self.issue_inner(bill, Some(nonce)).await
    }

    async fn issue_inner(
        &self,
        bill: &Bill,
        nonce: Option<ReconciliationNonce>,
    ) -> Result<PaymentRequest> {
        let bill_amount = to_base_units(bill.amount)?;
        let static_payload = self.source.load().await?;

        let transaction_id = self.ids.generate();
        let dynamic = match nonce {
            Some(nonce) => {
                self.transformer
                    .transform_with_nonce(static_payload, bill_amount, nonce)?
            }
            None => self.transformer.transform(static_payload, bill_amount)?,
        };

        Ok(PaymentRequest {
            transaction_id,
            resident: bill.resident.clone(),
            bill_amount,
            nonce: dynamic.nonce,
            final_amount: dynamic.final_amount,
            payload: dynamic.into_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checksum::verify_checksum;
    use crate::error::QrisError;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::entropy::FixedEntropy;
    use crate::infrastructure::source::InMemorySource;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    const STATIC_PAYLOAD: &str = "00020101021126570011ID.DANA.WWW011893600915302259148502090225914850303UMI51440014ID.CO.QRIS.WWW0215ID10200176114730303UMI5204549953033605802ID5920KOPERASI WARGA RT 056007JAKARTA61051234562070703A0163044267";

    fn service(nonce: u16) -> PaymentService {
        PaymentService::new(
            Box::new(InMemorySource::new(STATIC_PAYLOAD)),
            Arc::new(FixedClock::new(1_000)),
            Arc::new(FixedEntropy::new(nonce, "abcdefghi")),
        )
    }

    #[tokio::test]
    async fn test_issue_builds_payment_request() {
        let bill = Bill {
            resident: "Budi".to_string(),
            amount: dec!(15000.00),
        };

        let request = service(7).issue(&bill).await.unwrap();
        assert_eq!(request.transaction_id, "TXN-1000-abcdefghi");
        assert_eq!(request.bill_amount, 15000);
        assert_eq!(request.nonce.to_string(), "007");
        assert_eq!(request.final_amount.value(), 15007);
        assert!(request.payload.contains("5405150075802ID"));
        assert!(verify_checksum(&request.payload).is_ok());
    }

    #[tokio::test]
    async fn test_issue_with_pinned_nonce() {
        let bill = Bill {
            resident: "Sari".to_string(),
            amount: dec!(10000),
        };

        let request = service(900)
            .issue_with_nonce(&bill, ReconciliationNonce::new(5).unwrap())
            .await
            .unwrap();
        assert_eq!(request.final_amount.value(), 10005);
    }

    #[tokio::test]
    async fn test_issue_rejects_fractional_bill() {
        let bill = Bill {
            resident: "Sari".to_string(),
            amount: dec!(10000.50),
        };

        assert!(matches!(
            service(0).issue(&bill).await,
            Err(QrisError::ValueError(_))
        ));
    }
}
