use std::time::Duration;

use async_trait::async_trait;
use siddhi_core::{
    scan_with_fallback, ScanError, ScanOutcome, ScannedId, ScannerProvider, SimulatedScanner,
    SyntheticIdGenerator,
};

struct FixedScanner(Result<ScanOutcome, &'static str>);

#[async_trait]
impl ScannerProvider for FixedScanner {
    async fn scan(&self) -> Result<ScanOutcome, ScanError> {
        match &self.0 {
            Ok(outcome) => Ok(outcome.clone()),
            Err(msg) => Err(ScanError::Unavailable(msg.to_string())),
        }
    }
}

fn is_synthetic(id: &str) -> bool {
    id.len() == 7 && id.starts_with("RES") && id[3..].chars().all(|c| c.is_ascii_digit())
}

#[tokio::test]
async fn test_captured_id_passes_through() {
    let scanner = FixedScanner(Ok(ScanOutcome::Captured(" RES003 ".to_string())));
    let scanned = scan_with_fallback(&scanner, &SyntheticIdGenerator::default()).await;
    assert_eq!(scanned, ScannedId::Captured("RES003".to_string()));
}

#[tokio::test]
async fn test_cancel_falls_back() {
    let scanner = FixedScanner(Ok(ScanOutcome::Cancelled));
    let scanned = scan_with_fallback(&scanner, &SyntheticIdGenerator::default()).await;
    assert!(matches!(scanned, ScannedId::Synthetic(_)));
    assert!(is_synthetic(scanned.id()));
}

#[tokio::test]
async fn test_failure_falls_back() {
    let scanner = FixedScanner(Err("no camera"));
    let scanned = scan_with_fallback(&scanner, &SyntheticIdGenerator::default()).await;
    assert!(is_synthetic(&scanned.into_id()));
}

#[tokio::test]
async fn test_simulated_scanner_waits() {
    let scanner = SimulatedScanner::new(
        Duration::from_millis(20),
        SyntheticIdGenerator::new("RES", 4),
    );

    let started = std::time::Instant::now();
    let outcome = scanner.scan().await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(20));

    match outcome {
        ScanOutcome::Captured(id) => assert!(is_synthetic(&id)),
        ScanOutcome::Cancelled => panic!("simulated scanner never cancels"),
    }
}
