use super::amount::{FinalAmount, ReconciliationNonce};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A billing record to be collected through a dynamic QRIS code.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Bill {
    pub resident: String,
    pub amount: Decimal,
}

/// The outcome of issuing a dynamic payload for one bill.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct PaymentRequest {
    /// Display-only correlation identifier.
    pub transaction_id: String,
    pub resident: String,
    pub bill_amount: i64,
    pub nonce: ReconciliationNonce,
    /// What the payer is asked for; reconciled against the bill by its last digits.
    pub final_amount: FinalAmount,
    pub payload: String,
}
