//! Record-oriented input and output around the payment service.

pub mod csv;
