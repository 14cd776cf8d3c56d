//! Payload codec and value types. Everything here is synchronous and free of
//! shared state.

pub mod amount;
pub mod anchor;
pub mod checksum;
pub mod payment;
pub mod ports;
pub mod tlv;
