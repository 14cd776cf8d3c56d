//! Implementations of the domain ports.

pub mod clock;
pub mod entropy;
pub mod source;
