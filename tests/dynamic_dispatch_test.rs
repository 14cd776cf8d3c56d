use qris_dynamic::application::service::PaymentService;
use qris_dynamic::domain::checksum::verify_checksum;
use qris_dynamic::domain::payment::Bill;
use qris_dynamic::domain::ports::{ClockRef, EntropyRef, StaticPayloadSourceBox};
use qris_dynamic::infrastructure::clock::SystemClock;
use qris_dynamic::infrastructure::entropy::ThreadRngEntropy;
use qris_dynamic::infrastructure::source::{FileSource, InMemorySource};
use rust_decimal_macros::dec;
use std::sync::Arc;

mod common;

#[tokio::test]
async fn test_sources_as_trait_objects() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("static.txt");
    common::write_static_payload(&path, common::STATIC_PAYLOAD).unwrap();

    let sources: Vec<StaticPayloadSourceBox> = vec![
        Box::new(InMemorySource::new(common::STATIC_PAYLOAD)),
        Box::new(FileSource::new(&path)),
    ];

    let handles: Vec<_> = sources
        .into_iter()
        .map(|source| tokio::spawn(async move { source.load().await.unwrap() }))
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), common::STATIC_PAYLOAD);
    }
}

#[tokio::test]
async fn test_service_shared_across_tasks() {
    let clock: ClockRef = Arc::new(SystemClock);
    let entropy: EntropyRef = Arc::new(ThreadRngEntropy);
    let service = Arc::new(PaymentService::new(
        Box::new(InMemorySource::new(common::STATIC_PAYLOAD)),
        clock,
        entropy,
    ));

    let handles: Vec<_> = (1..=20)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                let bill = Bill {
                    resident: format!("Resident {i}"),
                    amount: dec!(10000),
                };
                service.issue(&bill).await.unwrap()
            })
        })
        .collect();

    for handle in handles {
        let request = handle.await.unwrap();
        assert!((10000..=10999).contains(&request.final_amount.value()));
        assert!(request.transaction_id.starts_with("TXN-"));
        assert!(verify_checksum(&request.payload).is_ok());
    }
}
