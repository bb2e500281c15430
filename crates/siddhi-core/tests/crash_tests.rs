use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use siddhi_core::CrashReporter;
use tempfile::TempDir;

// Panic hooks are process-wide, so this binary holds a single test.
#[test]
fn test_hook_writes_report_and_chains() {
    let temp = TempDir::new().unwrap();
    let reporter = CrashReporter::new(temp.path().join("crash.log"));

    let chained = Arc::new(AtomicBool::new(false));
    let flag = chained.clone();
    panic::set_hook(Box::new(move |_| flag.store(true, Ordering::SeqCst)));

    reporter.install();
    let result = panic::catch_unwind(|| panic!("shelf collapsed"));
    let _ = panic::take_hook();

    assert!(result.is_err());
    assert!(chained.load(Ordering::SeqCst));

    let report = reporter.take_previous_report().unwrap();
    assert!(report.contains("shelf collapsed"));
    assert!(report.contains("crash_tests.rs"));
    assert!(reporter.take_previous_report().is_none());
}
