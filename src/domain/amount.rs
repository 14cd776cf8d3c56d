use crate::domain::tlv::{Field, MAX_VALUE_LEN, TAG_AMOUNT};
use crate::error::{QrisError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};
use std::fmt;

/// Small random offset added to a bill so identical bills produce
/// distinguishable totals.
///
/// Always in `0..=999` and rendered as three zero-padded digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ReconciliationNonce(u16);

impl ReconciliationNonce {
    pub const MAX: u16 = 999;

    pub fn new(value: u16) -> Result<Self> {
        if value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(QrisError::ValueError(format!(
                "reconciliation nonce must be at most {}, got {value}",
                Self::MAX
            )))
        }
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for ReconciliationNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl Serialize for ReconciliationNonce {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// The amount embedded in a dynamic payload: bill plus nonce, in base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FinalAmount(u64);

impl FinalAmount {
    pub fn new(bill_amount: i64, nonce: ReconciliationNonce) -> Result<Self> {
        let total = bill_amount
            .checked_add(i64::from(nonce.value()))
            .ok_or_else(|| {
                QrisError::ValueError(format!("bill amount {bill_amount} overflows with nonce {nonce}"))
            })?;
        if total <= 0 {
            return Err(QrisError::ValueError(format!(
                "final amount must be positive, got {total}"
            )));
        }

        let amount = Self(total.unsigned_abs());
        let digits = amount.0.to_string().len();
        if digits > MAX_VALUE_LEN {
            return Err(QrisError::ValueError(format!(
                "final amount has {digits} digits, the length field holds at most {MAX_VALUE_LEN}"
            )));
        }
        Ok(amount)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Builds the `54` transaction amount field.
    pub fn to_field(&self) -> Result<Field> {
        Field::new(TAG_AMOUNT, self.0.to_string())
    }
}

impl fmt::Display for FinalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts a billed decimal amount into whole currency base units.
///
/// `15000.00` is accepted; `15000.50` is not.
pub fn to_base_units(amount: Decimal) -> Result<i64> {
    if !amount.fract().is_zero() {
        return Err(QrisError::ValueError(format!(
            "amount {amount} has a fractional part"
        )));
    }
    amount
        .trunc()
        .to_i64()
        .ok_or_else(|| QrisError::ValueError(format!("amount {amount} is out of range")))
}
