//! `stockroom` command-line entry point.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use stockroom_desktop::messages::PRODUCT_NOT_PRESENT;
use stockroom_desktop::render::{describe_product, render_table};
use stockroom_desktop::{AdminSession, SearchOutcome, Shell, StatusMessage, describe_error};
use stockroom_infra::{FlatFileRepository, LoadPolicy, ServiceError, StoreConfig};
use stockroom_observability::{LOG_FORMAT_ENV, LogFormat};

/// Stockroom - keep a product list with prices and stock levels.
#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Product list file [env: STOCKROOM_DATA_FILE] [default: product_data.txt].
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// What to do with unreadable records on load: strict or lenient
    /// [env: STOCKROOM_LOAD_POLICY] [default: strict].
    #[arg(long, global = true)]
    load_policy: Option<LoadPolicy>,

    /// Log output format: text or json.
    #[arg(long, global = true, env = LOG_FORMAT_ENV, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands. Without one, the interactive shell starts.
#[derive(Subcommand)]
enum Commands {
    /// Show all products.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Find the first product whose name contains a term (any case).
    Search {
        /// Text to look for.
        term: String,
    },

    /// Add a new product.
    Add {
        /// Product name.
        name: String,

        /// Price per unit (Rs).
        price: String,

        /// Initial quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// Add to the quantity of a product.
    AddStock {
        /// Row number as shown by `list`.
        row: usize,

        /// Amount to add.
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// Delete a product.
    Delete {
        /// Row number as shown by `list`.
        row: usize,

        /// Do not ask for confirmation.
        #[arg(short, long)]
        yes: bool,
    },

    /// Start the interactive shell.
    Shell,
}

fn main() -> ExitCode {
    let mut cli = Cli::parse();
    stockroom_observability::init(cli.log_format);

    let mut session = match open_session(&cli) {
        Ok(session) => session,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "startup failed");
            eprintln!("error: {err:#}");
            return ExitCode::from(2);
        }
    };

    let command = cli.command.take().unwrap_or(Commands::Shell);
    match run(&mut session, command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn open_session(cli: &Cli) -> anyhow::Result<AdminSession<FlatFileRepository>> {
    let mut config = StoreConfig::from_env().context("invalid environment configuration")?;
    if let Some(path) = &cli.data_file {
        config.data_file = path.clone();
    }
    if let Some(policy) = cli.load_policy {
        config.load_policy = policy;
    }

    tracing::info!(
        data_file = %config.data_file.display(),
        load_policy = %config.load_policy,
        "opening product list"
    );
    AdminSession::open(config.repository()).with_context(|| {
        format!(
            "failed to load product list from {}",
            config.data_file.display()
        )
    })
}

fn run(
    session: &mut AdminSession<FlatFileRepository>,
    command: Commands,
) -> anyhow::Result<ExitCode> {
    let mut stdout = io::stdout().lock();

    match command {
        Commands::List { json } => {
            if json {
                let text = serde_json::to_string_pretty(session.products())
                    .context("failed to encode product list")?;
                writeln!(stdout, "{text}")?;
            } else {
                write!(stdout, "{}", render_table(session.products(), None))?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Search { term } => {
            match session.search(&term) {
                SearchOutcome::Found { index, product } => {
                    writeln!(stdout, "{}", describe_product(index, &product))?;
                }
                SearchOutcome::NotFound { .. } => {
                    writeln!(stdout, "{PRODUCT_NOT_PRESENT}")?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Add {
            name,
            price,
            quantity,
        } => report(&mut stdout, session.add_product(&name, &price, &quantity)),
        Commands::AddStock { row, quantity } => {
            if let Err(err) = session.select(row) {
                return report(&mut stdout, Err(err));
            }
            report(&mut stdout, session.add_stock(&quantity))
        }
        Commands::Delete { row, yes } => {
            let product = match session.select(row) {
                Ok(product) => product.clone(),
                Err(err) => return report(&mut stdout, Err(err)),
            };
            if !yes && !confirm_delete(&mut stdout, &describe_product(row, &product))? {
                writeln!(stdout, "Cancelled.")?;
                return Ok(ExitCode::SUCCESS);
            }
            report(&mut stdout, session.delete_stock())
        }
        Commands::Shell => {
            drop(stdout);
            let mut shell = Shell::new(io::stdin().lock(), io::stdout().lock());
            shell.run(session).context("shell I/O failed")?;
            if session.service().has_unsaved_changes() {
                eprintln!("warning: the last change could not be saved");
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn report(
    out: &mut impl Write,
    result: Result<StatusMessage, ServiceError>,
) -> anyhow::Result<ExitCode> {
    match result {
        Ok(status) => {
            writeln!(out, "{status}")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("Error: {}", describe_error(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn confirm_delete(out: &mut impl Write, what: &str) -> anyhow::Result<bool> {
    write!(out, "Delete {what}? [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
