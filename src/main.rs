use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use qris_dynamic::application::service::PaymentService;
use qris_dynamic::domain::amount::ReconciliationNonce;
use qris_dynamic::domain::checksum::verify_checksum;
use qris_dynamic::domain::payment::Bill;
use qris_dynamic::infrastructure::clock::SystemClock;
use qris_dynamic::infrastructure::entropy::ThreadRngEntropy;
use qris_dynamic::infrastructure::source::FileSource;
use qris_dynamic::interfaces::csv::bill_reader::BillReader;
use qris_dynamic::interfaces::csv::payment_writer::{OutputFormat, PaymentRequestWriter};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File holding the merchant's static QRIS payload text
    #[arg(long, global = true, env = "QRIS_STATIC_PAYLOAD")]
    static_payload: Option<PathBuf>,

    /// Log filter directive (trace, debug, info, warn, error, or a full EnvFilter)
    #[arg(long, global = true, env = "QRIS_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Issue one dynamic payload for a bill amount
    Issue {
        /// Bill amount in whole rupiah
        #[arg(long, allow_hyphen_values = true)]
        amount: i64,

        /// Who the bill belongs to
        #[arg(long, default_value = "")]
        resident: String,

        /// Pin the reconciliation nonce (0-999) instead of drawing one
        #[arg(long)]
        nonce: Option<u16>,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Issue dynamic payloads for every bill in a CSV file (resident,amount)
    Batch {
        input: PathBuf,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Check the trailing checksum of a payload
    Verify { payload: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Issue {
            amount,
            resident,
            nonce,
            format,
        } => {
            let service = build_service(cli.static_payload)?;
            let bill = Bill {
                resident,
                amount: Decimal::from(amount),
            };
            let request = match nonce {
                Some(nonce) => {
                    let nonce = ReconciliationNonce::new(nonce)?;
                    service.issue_with_nonce(&bill, nonce).await?
                }
                None => service.issue(&bill).await?,
            };

            let stdout = io::stdout();
            let mut writer = PaymentRequestWriter::new(stdout.lock(), format);
            writer.write(&request)?;
            writer.flush()?;
        }
        Command::Batch { input, format } => {
            let service = build_service(cli.static_payload)?;
            let file = File::open(input).into_diagnostic()?;
            let reader = BillReader::new(file);

            let stdout = io::stdout();
            let mut writer = PaymentRequestWriter::new(stdout.lock(), format);
            for bill_result in reader.bills() {
                match bill_result {
                    Ok(bill) => match service.issue(&bill).await {
                        Ok(request) => writer.write(&request)?,
                        Err(e) => error!("Error issuing payment for {}: {}", bill.resident, e),
                    },
                    Err(e) => error!("Error reading bill: {}", e),
                }
            }
            writer.flush()?;
        }
        Command::Verify { payload } => {
            let checksum = verify_checksum(payload.trim())?;
            println!("{checksum}");
        }
    }

    Ok(())
}

fn build_service(static_payload: Option<PathBuf>) -> Result<PaymentService> {
    let path = static_payload
        .ok_or_else(|| miette!("--static-payload (or QRIS_STATIC_PAYLOAD) is required"))?;
    let entropy = Arc::new(ThreadRngEntropy);
    Ok(PaymentService::new(
        Box::new(FileSource::new(path)),
        Arc::new(SystemClock),
        entropy,
    ))
}

fn init_logging(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}
