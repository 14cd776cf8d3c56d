use crate::domain::payment::Bill;
use crate::error::{QrisError, Result};
use std::io::Read;

/// Reads bills from a CSV source with a `resident,amount` header.
///
/// Whitespace around fields is trimmed and short rows are tolerated so a bad
/// row surfaces as an error for that row only.
pub struct BillReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> BillReader<R> {
    /// Creates a new `BillReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes bills.
    pub fn bills(self) -> impl Iterator<Item = Result<Bill>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(QrisError::from))
    }
}
