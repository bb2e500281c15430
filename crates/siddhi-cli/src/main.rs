mod commands;
mod logging;
mod serve;
mod tui;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::Result;

use siddhi_core::{Config, CrashReporter, MemoryStore, ResourceManager};

use logging::LogTarget;

#[derive(Parser)]
#[command(name = "siddhi")]
#[command(about = "Scan or type a resource ID, then create or edit it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive resource form (default)
    Form,
    /// List all known resources
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Look up a resource by ID
    Lookup {
        /// Resource ID
        id: String,
    },
    /// Validate and save a resource
    Submit(commands::SubmitArgs),
    /// Scan a barcode, then look the ID up
    Scan {
        /// Read the barcode from standard input instead of simulating a scan
        #[arg(long)]
        stdin: bool,
    },
    /// Serve the resource form in the browser
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
        /// Don't open the browser
        #[arg(long)]
        no_open: bool,
    },
    /// Print the default configuration file
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = Config::load()?;
    let command = cli.command.unwrap_or(Commands::Form);

    let target = match command {
        Commands::Form => LogTarget::File(config.storage.log_path()),
        _ => LogTarget::Stderr,
    };
    logging::init(&target)?;

    // Installed after color-eyre so its hook still runs.
    let reporter = CrashReporter::from_config(&config.storage);
    let previous_crash = reporter.take_previous_report();
    reporter.install();

    if !matches!(command, Commands::Form) {
        if let Some(report) = &previous_crash {
            eprintln!("Previous crash log:\n{}", report);
        }
    }

    let store = MemoryStore::with_resources(config.catalog.initial_resources()?);

    match command {
        Commands::Form => {
            let manager = ResourceManager::new(store);
            tui::run(config, manager, previous_crash).await?;
        }
        Commands::List { format } => commands::list(&store, format)?,
        Commands::Lookup { id } => commands::lookup(&store, &id),
        Commands::Submit(args) => {
            let mut manager = ResourceManager::new(store);
            if !commands::submit(&mut manager, args)? {
                std::process::exit(1);
            }
        }
        Commands::Scan { stdin } => commands::scan(&config, &store, stdin).await,
        Commands::Serve { port, no_open } => {
            let serve_config = serve::ServeConfig {
                port: port.unwrap_or(config.server.port),
                open_browser: config.server.open_browser && !no_open,
                scanner: config.scanner.clone(),
            };
            serve::start_server(serve_config, store).await?;
        }
        Commands::Config => print!("{}", Config::default_config_string()),
    }

    Ok(())
}
