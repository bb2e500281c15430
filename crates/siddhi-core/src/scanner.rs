//! Barcode scanning.
//!
//! Real decoding is left to whatever implements [`ScannerProvider`]. When a
//! scan is cancelled or the scanner fails, [`scan_with_fallback`] hands back
//! a synthetic id so the form can still proceed.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;
use tracing::warn;

use crate::config::ScannerConfig;

/// What a scanner produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Captured(String),
    /// The user backed out without capturing anything.
    Cancelled,
}

/// Errors a scanner can report.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Scanner not available: {0}")]
    Unavailable(String),

    #[error("Scanner I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A source of scanned resource ids.
#[async_trait]
pub trait ScannerProvider: Send + Sync {
    /// Waits for one scan.
    async fn scan(&self) -> Result<ScanOutcome, ScanError>;
}

/// Generates ids like `RES0042`: a prefix plus zero-padded digits drawn
/// uniformly from `[0, 10^digits)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticIdGenerator {
    prefix: String,
    digits: u32,
}

impl SyntheticIdGenerator {
    pub fn new(prefix: impl Into<String>, digits: u32) -> Self {
        Self {
            prefix: prefix.into(),
            digits: digits.clamp(1, 9),
        }
    }

    pub fn from_config(config: &ScannerConfig) -> Self {
        Self::new(&config.id_prefix, config.id_digits)
    }

    /// Exclusive upper bound of the numeric part.
    pub fn range(&self) -> u32 {
        10u32.pow(self.digits)
    }

    /// Draws an id from the thread-local RNG.
    pub fn generate(&self) -> String {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Draws an id from `rng`.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let n = rng.gen_range(0..self.range());
        format!("{}{:0width$}", self.prefix, n, width = self.digits as usize)
    }
}

impl Default for SyntheticIdGenerator {
    fn default() -> Self {
        Self::from_config(&ScannerConfig::default())
    }
}

/// Stands in for camera hardware: waits, then "reads" a synthetic id.
#[derive(Debug, Clone)]
pub struct SimulatedScanner {
    delay: Duration,
    generator: SyntheticIdGenerator,
}

impl SimulatedScanner {
    pub fn new(delay: Duration, generator: SyntheticIdGenerator) -> Self {
        Self { delay, generator }
    }

    pub fn from_config(config: &ScannerConfig) -> Self {
        Self::new(
            Duration::from_millis(config.delay_ms),
            SyntheticIdGenerator::from_config(config),
        )
    }
}

#[async_trait]
impl ScannerProvider for SimulatedScanner {
    async fn scan(&self) -> Result<ScanOutcome, ScanError> {
        tokio::time::sleep(self.delay).await;
        Ok(ScanOutcome::Captured(self.generator.generate()))
    }
}

/// Where a scanned id came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannedId {
    Captured(String),
    Synthetic(String),
}

impl ScannedId {
    pub fn id(&self) -> &str {
        match self {
            Self::Captured(id) | Self::Synthetic(id) => id,
        }
    }

    pub fn into_id(self) -> String {
        match self {
            Self::Captured(id) | Self::Synthetic(id) => id,
        }
    }
}

/// Scans once, substituting a synthetic id when nothing usable was captured.
///
/// Never fails: cancellation, blank captures and scanner errors all fall
/// back to `generator`.
pub async fn scan_with_fallback(
    provider: &dyn ScannerProvider,
    generator: &SyntheticIdGenerator,
) -> ScannedId {
    match provider.scan().await {
        Ok(ScanOutcome::Captured(id)) if !id.trim().is_empty() => {
            ScannedId::Captured(id.trim().to_string())
        }
        Ok(ScanOutcome::Captured(_)) | Ok(ScanOutcome::Cancelled) => {
            warn!("No barcode captured, using a synthetic id");
            ScannedId::Synthetic(generator.generate())
        }
        Err(e) => {
            warn!(error = %e, "Scanner failed, using a synthetic id");
            ScannedId::Synthetic(generator.generate())
        }
    }
}
