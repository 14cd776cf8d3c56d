//! Application layer orchestrating the payload codec.
//!
//! `DynamicPayloadTransformer` is the pure core; `PaymentService` is the
//! calling layer that owns the static payload cache and produces complete
//! payment requests for bills.

pub mod identifier;
pub mod service;
pub mod transformer;
