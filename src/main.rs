//! Softkey - on-screen keyboard input simulator
//!
//! Replays keystroke scripts against the keyboard controller, lists the key
//! catalog, manages preferences and runs an interactive terminal session.

use clap::{Parser, Subcommand};
use softkey::cli::{CliError, ConfigArgs, ExitCode, KeysArgs, TypeArgs};
use softkey::constants::{APP_BINARY_NAME, APP_NAME};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "terminal")]
use softkey::cli::InteractiveArgs;

/// Softkey - on-screen keyboard input simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Type a keystroke script and print the resulting text
    Type(TypeArgs),
    /// List the keys on each keyboard page
    Keys(KeysArgs),
    /// Manage preferences
    Config(ConfigArgs),
    /// Type into a simulated text field in the terminal
    #[cfg(feature = "terminal")]
    Interactive(InteractiveArgs),
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let result = match &cli.command {
        Command::Type(args) => args.execute(),
        Command::Keys(args) => args.execute(),
        Command::Config(args) => args.execute(),
        #[cfg(feature = "terminal")]
        Command::Interactive(args) => args.execute(),
    };

    if let Err(error) = result {
        report(&error);
        std::process::exit(error.exit_code().code());
    }

    std::process::exit(ExitCode::Success.code());
}

fn report(error: &CliError) {
    eprintln!("Error: {error}");
    if error.exit_code() == ExitCode::UsageError {
        eprintln!();
        eprintln!("For more options, run:");
        eprintln!("  {APP_BINARY_NAME} --help");
    }
}
