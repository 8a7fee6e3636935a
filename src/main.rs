use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use fxtrend::cli::ui;
use fxtrend::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct Pair {
    /// Currency to convert from, e.g. USD
    from: Option<String>,
    /// Currency to convert to, e.g. EUR
    to: Option<String>,
}

impl From<Pair> for fxtrend::PairArgs {
    fn from(pair: Pair) -> Self {
        fxtrend::PairArgs {
            from: pair.from,
            to: pair.to,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount at the current rate
    Convert {
        #[command(flatten)]
        pair: Pair,
        /// Amount to convert
        #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
        amount: f64,
        /// Also show the recent rate trend
        #[arg(short, long)]
        trend: bool,
        /// Trend window in days
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// Display the daily rate over the trailing days
    Trend {
        #[command(flatten)]
        pair: Pair,
        /// Trend window in days
        #[arg(short, long)]
        days: Option<u32>,
        /// Last day of the window (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Convert an amount and print a mailto link with the result
    Share {
        #[command(flatten)]
        pair: Pair,
        /// Recipient email address
        #[arg(long = "to-email", value_name = "EMAIL")]
        recipient: String,
        /// Amount to convert
        #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
        amount: f64,
    },
    /// List the configured quick-pick currencies
    Currencies,
}

impl From<Commands> for fxtrend::AppCommand {
    fn from(cmd: Commands) -> fxtrend::AppCommand {
        match cmd {
            Commands::Convert {
                pair,
                amount,
                trend,
                days,
            } => fxtrend::AppCommand::Convert {
                pair: pair.into(),
                amount,
                trend,
                days,
            },
            Commands::Trend { pair, days, date } => fxtrend::AppCommand::Trend {
                pair: pair.into(),
                days,
                date,
            },
            Commands::Share {
                pair,
                recipient,
                amount,
            } => fxtrend::AppCommand::Share {
                pair: pair.into(),
                amount,
                recipient,
            },
            Commands::Currencies => fxtrend::AppCommand::Currencies,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{}", ui::style_text(&format!("Warning: {e:#}"), ui::StyleType::Subtle));
    }

    let result = match cli.command {
        Some(Commands::Setup) => fxtrend::cli::setup::setup(),
        Some(cmd) => fxtrend::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
        eprintln!("{}", ui::style_text(&format!("Error: {e:#}"), ui::StyleType::Error));
        std::process::exit(1);
    }
    Ok(())
}
