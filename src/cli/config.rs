//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::preferences::PreferenceKey;
use clap::{Args, Subcommand};
use serde::Serialize;
use tracing::warn;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
    /// Print the configuration file path
    Path,
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Capitalize automatically at word and sentence starts
    #[arg(long, value_name = "BOOL")]
    auto_capitalization: Option<bool>,

    /// Replace a double space after a word with ". "
    #[arg(long, value_name = "BOOL")]
    auto_period: Option<bool>,

    /// Click on every key press
    #[arg(long, value_name = "BOOL")]
    key_clicks: Option<bool>,

    /// Delay before a held backspace repeats, in milliseconds
    #[arg(long, value_name = "MS")]
    backspace_delay: Option<u64>,

    /// Interval between repeated deletes, in milliseconds
    #[arg(long, value_name = "MS")]
    backspace_repeat: Option<u64>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    path: String,
    exists: bool,
    input: InputOutput,
    timing: TimingOutput,
}

#[derive(Serialize, Debug)]
struct InputOutput {
    auto_capitalization: bool,
    auto_period: bool,
    key_clicks: bool,
}

#[derive(Serialize, Debug)]
struct TimingOutput {
    backspace_delay_ms: u64,
    backspace_repeat_ms: u64,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path().map_err(|e| {
                    CliError::io(format!("Failed to resolve config path: {e:#}"))
                })?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load().map_err(|e| {
            CliError::validation(format!("Failed to load configuration: {e:#}"))
        })?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    fn preference_updates(&self) -> [(PreferenceKey, Option<bool>); 3] {
        [
            (PreferenceKey::AutoCapitalization, self.auto_capitalization),
            (PreferenceKey::AutoPeriod, self.auto_period),
            (PreferenceKey::KeyClicks, self.key_clicks),
        ]
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        let updates = self.preference_updates();

        // At least one argument must be provided
        if updates.iter().all(|(_, value)| value.is_none())
            && self.backspace_delay.is_none()
            && self.backspace_repeat.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --auto-capitalization, \
                 --auto-period, --key-clicks, --backspace-delay, or --backspace-repeat",
            ));
        }

        // Load current configuration
        let mut config = Config::load().unwrap_or_else(|e| {
            warn!("Ignoring unreadable configuration: {e:#}");
            Config::default()
        });

        for (key, value) in updates {
            if let Some(value) = value {
                config.set_preference(key, value);
            }
        }

        if let Some(ms) = self.backspace_delay {
            config.timing.backspace_delay_ms = ms;
        }
        if let Some(ms) = self.backspace_repeat {
            config.timing.backspace_repeat_ms = ms;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;

        // Save configuration
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn to_output(config: &Config) -> ConfigOutput {
    let path = Config::config_file_path()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default();

    ConfigOutput {
        path,
        exists: Config::exists(),
        input: InputOutput {
            auto_capitalization: config.input.auto_capitalization,
            auto_period: config.input.auto_period,
            key_clicks: config.input.key_clicks,
        },
        timing: TimingOutput {
            backspace_delay_ms: config.timing.backspace_delay_ms,
            backspace_repeat_ms: config.timing.backspace_repeat_ms,
        },
    }
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let json = serde_json::to_string_pretty(&to_output(config))
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    let output = to_output(config);

    println!("Configuration");
    println!("=============");
    println!();
    if output.exists {
        println!("File: {}", output.path);
    } else {
        println!("File: {} (not created yet, showing defaults)", output.path);
    }
    println!();
    println!("Input:");
    for key in PreferenceKey::ALL {
        let value = match key {
            PreferenceKey::AutoCapitalization => output.input.auto_capitalization,
            PreferenceKey::AutoPeriod => output.input.auto_period,
            PreferenceKey::KeyClicks => output.input.key_clicks,
        };
        println!("  {:<20} {}", key.name(), if value { "on" } else { "off" });
    }
    println!();
    println!("Timing:");
    println!("  backspace_delay_ms   {}", output.timing.backspace_delay_ms);
    println!("  backspace_repeat_ms  {}", output.timing.backspace_repeat_ms);
}
