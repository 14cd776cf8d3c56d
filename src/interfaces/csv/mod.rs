pub mod bill_reader;
pub mod payment_writer;
