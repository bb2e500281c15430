//! One-shot commands: list, lookup, submit and scan.

use std::time::Duration;

use async_trait::async_trait;
use clap::Args;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};

use siddhi_core::{
    scan_with_fallback, Config, FormSession, IdOutcome, MediumType, MemoryStore, Resource,
    ResourceKind, ResourceManager, ScanError, ScanOutcome, ScannedId, ScannerProvider,
    SimulatedScanner, SyntheticIdGenerator,
};

use crate::OutputFormat;

/// Fields for `siddhi submit`.
///
/// Omitted fields keep their stored value. An explicit empty value
/// (`--parent ""`) clears the field.
#[derive(Debug, Default, Args)]
pub struct SubmitArgs {
    /// Resource ID
    #[arg(long)]
    pub id: String,
    /// Display name
    #[arg(long)]
    pub name: Option<String>,
    /// object or container
    #[arg(long)]
    pub kind: Option<String>,
    /// virtual or physical
    #[arg(long)]
    pub medium: Option<String>,
    /// Mark a container as a base container (`--base false` to unmark)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub base: Option<bool>,
    /// Location of a base container
    #[arg(long)]
    pub location: Option<String>,
    /// ID of the parent container
    #[arg(long)]
    pub parent: Option<String>,
}

/// Print every resource in the chosen format.
pub fn list(store: &MemoryStore, format: OutputFormat) -> Result<()> {
    let resources = store.resources();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(resources)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(resources)?),
        OutputFormat::Table => {
            if resources.is_empty() {
                println!("No resources found.");
                return Ok(());
            }
            println!(
                "{:<10} {:<20} {:<10} {:<5} {:<9} {}",
                "ID", "NAME", "KIND", "BASE", "MEDIUM", "LOCATION / PARENT"
            );
            for r in resources {
                println!("{}", table_row(r));
            }
        }
    }

    Ok(())
}

fn table_row(r: &Resource) -> String {
    let placement = if r.location.is_empty() {
        r.parent_id.as_str()
    } else {
        r.location.as_str()
    };
    format!(
        "{:<10} {:<20} {:<10} {:<5} {:<9} {}",
        r.id,
        r.name,
        r.kind.map_or("-", ResourceKind::as_str),
        if r.is_base_container { "yes" } else { "no" },
        r.medium.map_or("-", MediumType::as_str),
        placement
    )
}

/// Look an id up and describe what the form would show.
pub fn lookup(store: &MemoryStore, id: &str) {
    let mut session = FormSession::new();

    match session.on_id_entered(id, store.resources()) {
        IdOutcome::Blank => {
            println!("Resource ID is required");
            return;
        }
        IdOutcome::Found(r) => {
            println!("Resource found: {}", r.name);
            println!("{}", table_row(&r));
        }
        IdOutcome::New(_) => println!("New resource - please fill in the details"),
    }

    if let Some(status) = session.status_line() {
        println!("{}", status);
    }

    let v = session.visibility();
    println!(
        "Fields: base toggle {}, location {}, parent {}",
        shown(v.base_toggle),
        shown(v.location),
        shown(v.parent_selector)
    );
}

fn shown(visible: bool) -> &'static str {
    if visible {
        "shown"
    } else {
        "hidden"
    }
}

/// Run the form flow for one resource. Returns `false` if validation failed.
pub fn submit(manager: &mut ResourceManager<MemoryStore>, args: SubmitArgs) -> Result<bool> {
    let kind = args
        .kind
        .as_deref()
        .map(ResourceKind::parse_optional)
        .transpose()?;
    let medium = args
        .medium
        .as_deref()
        .map(MediumType::parse_optional)
        .transpose()?;

    if let IdOutcome::Blank = manager.enter_id(&args.id)? {
        eprintln!("Resource ID is required");
        return Ok(false);
    }

    let session = manager.session_mut();
    if let Some(name) = args.name {
        session.set_name(name);
    }
    if let Some(kind) = kind {
        session.set_kind(kind);
    }
    if let Some(medium) = medium {
        session.set_medium(medium);
    }
    if let Some(is_base) = args.base {
        session.set_base_container(is_base);
    }
    if let Some(location) = args.location {
        session.set_location(location);
    }
    if let Some(parent) = args.parent {
        session.set_parent(parent);
    }

    match manager.submit() {
        Ok(outcome) => {
            println!("{}", outcome.message());
            println!("{}", table_row(&outcome.resource));
            Ok(true)
        }
        Err(e) => match e.validation() {
            Some(reason) => {
                eprintln!("{}", reason);
                Ok(false)
            }
            None => Err(e.into()),
        },
    }
}

/// Reads one barcode per line from standard input. A blank line cancels.
pub struct StdinScanner;

#[async_trait]
impl ScannerProvider for StdinScanner {
    async fn scan(&self) -> Result<ScanOutcome, ScanError> {
        let line = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).map(|_| line)
        })
        .await
        .map_err(|e| ScanError::Unavailable(e.to_string()))??;

        let line = line.trim();
        if line.is_empty() {
            Ok(ScanOutcome::Cancelled)
        } else {
            Ok(ScanOutcome::Captured(line.to_string()))
        }
    }
}

/// Scan once (falling back to a synthetic id) and look the result up.
pub async fn scan(config: &Config, store: &MemoryStore, from_stdin: bool) {
    let generator = SyntheticIdGenerator::from_config(&config.scanner);

    let scanned = if from_stdin {
        eprintln!("Scan a barcode (blank line to cancel):");
        scan_with_fallback(&StdinScanner, &generator).await
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Scanning...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let scanner = SimulatedScanner::from_config(&config.scanner);
        let scanned = scan_with_fallback(&scanner, &generator).await;
        spinner.finish_and_clear();
        scanned
    };

    match &scanned {
        ScannedId::Captured(id) => println!("Barcode scanned: {}", id),
        ScannedId::Synthetic(id) => println!("No barcode captured, using {}", id),
    }

    lookup(store, scanned.id());
}
