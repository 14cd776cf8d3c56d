use crate::domain::payment::PaymentRequest;
use crate::error::Result;
use clap::ValueEnum;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// One JSON object per line
    Json,
}

/// Writes issued payment requests to any `Write` sink.
pub struct PaymentRequestWriter<W: Write> {
    inner: Sink<W>,
}

enum Sink<W: Write> {
    Csv(csv::Writer<W>),
    Json(W),
}

impl<W: Write> PaymentRequestWriter<W> {
    pub fn new(sink: W, format: OutputFormat) -> Self {
        let inner = match format {
            OutputFormat::Csv => Sink::Csv(csv::Writer::from_writer(sink)),
            OutputFormat::Json => Sink::Json(sink),
        };
        Self { inner }
    }

    pub fn write(&mut self, request: &PaymentRequest) -> Result<()> {
        match &mut self.inner {
            Sink::Csv(writer) => writer.serialize(request)?,
            Sink::Json(writer) => {
                serde_json::to_writer(&mut *writer, request)?;
                writeln!(writer)?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        match &mut self.inner {
            Sink::Csv(writer) => writer.flush()?,
            Sink::Json(writer) => writer.flush()?,
        }
        Ok(())
    }
}
