//! Keystroke script replay command.

use crate::catalog::KeyCatalog;
use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::document::{CapitalizationMode, MemoryDocument};
use crate::input::{ControllerEvent, KeyboardController};
use crate::models::ShiftState;
use crate::script::{self, Player};
use crate::timer::TimerQueue;
use clap::Args;
use serde::Serialize;
use tracing::info;

/// Type a keystroke script and print the resulting text
#[derive(Debug, Clone, Args)]
pub struct TypeArgs {
    /// Keystroke script, e.g. "hello  world{bs}" (see `softkey type --help`)
    #[arg(value_name = "SCRIPT", long_help = SCRIPT_HELP)]
    pub script: String,

    /// Text already in the field before typing
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub initial: String,

    /// Field capitalization mode (none, words, sentences, all_characters)
    #[arg(long, value_name = "MODE", default_value = "sentences")]
    pub capitalization: CapitalizationMode,

    /// List the events the keyboard raised
    #[arg(long)]
    pub events: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

const SCRIPT_HELP: &str = "Keystroke script. Each character taps the key that types it. \
Tokens: {shift} {shift-down} {shift-up} {shift-double} {bs} {bs-hold:MS} {wait:MS} \
{mode:N} {return} {next} {context} {rotate}. Use {{ for a literal brace.";

#[derive(Debug, Serialize)]
struct TypeResult {
    text: String,
    cursor: usize,
    shift: ShiftState,
    mode: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<Vec<ControllerEvent>>,
}

impl TypeArgs {
    /// Execute the type command
    pub fn execute(&self) -> CliResult<()> {
        if self.script.is_empty() {
            return Err(CliError::usage("Script is empty; nothing to type"));
        }

        let config = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;

        let catalog = KeyCatalog::load()
            .map_err(|e| CliError::io(format!("Failed to load key catalog: {e:#}")))?;

        let steps = script::parse(&self.script)
            .map_err(|e| CliError::validation(format!("Invalid script: {e:#}")))?;

        let mut doc =
            MemoryDocument::with_text(&self.initial).with_capitalization(Some(self.capitalization));
        let mut ctl = KeyboardController::new(TimerQueue::new(), config).with_backspace_timing(
            config.timing.backspace_delay(),
            config.timing.backspace_repeat(),
        );

        // The field just gained focus
        ctl.on_external_context_changed(&mut doc);

        info!(steps = steps.len(), "replaying script");
        let mut player = Player::new(&catalog);
        player
            .play(&steps, &mut ctl, &mut doc)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let mut events = player.into_events();
        events.extend(ctl.drain_events());

        let result = TypeResult {
            text: doc.text().to_string(),
            cursor: doc.cursor(),
            shift: ctl.shift_state(),
            mode: ctl.mode(),
            events: self.events.then_some(events),
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&result)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            output_human_readable(&result, &catalog);
        }

        Ok(())
    }
}

fn output_human_readable(result: &TypeResult, catalog: &KeyCatalog) {
    let page = catalog
        .page(result.mode)
        .map_or("?", |page| page.name.as_str());

    println!("Text:  {:?}", result.text);
    println!("Shift: {}", result.shift);
    println!("Mode:  {} ({page})", result.mode);

    if let Some(events) = &result.events {
        println!();
        println!("Events:");
        for event in events {
            println!("  {}", describe(event));
        }
    }
}

fn describe(event: &ControllerEvent) -> String {
    match event {
        ControllerEvent::ShiftChanged { shift } => format!("shift -> {shift}"),
        ControllerEvent::ModeChanged { mode, shift } => format!("mode -> {mode} ({shift})"),
        ControllerEvent::LockHintCleared => "lock hint cleared".to_string(),
        ControllerEvent::TrackedTouchesReset => "tracked touches reset".to_string(),
        ControllerEvent::AdvanceInputMode => "advance input mode".to_string(),
        ControllerEvent::ToggleSettings => "toggle settings".to_string(),
        ControllerEvent::RefreshKeyCaps { shift } => format!("refresh key caps ({shift})"),
    }
}
