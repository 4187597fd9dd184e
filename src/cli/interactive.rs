//! Interactive terminal session.
//!
//! Maps terminal keys onto the keyboard controller and redraws the field
//! after every event. Terminals that report key releases get a real
//! backspace hold; others treat every backspace press as a tap.

use crate::catalog::KeyCatalog;
use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::document::{CapitalizationMode, MemoryDocument};
use crate::feedback::TerminalBell;
use crate::input::{ControllerEvent, KeyboardController};
use crate::script::{Player, Step};
use crate::timer::TimerQueue;
use anyhow::{Context, Result};
use clap::Args;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::Print;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::info;

/// Number of recent events shown under the field.
const EVENT_HISTORY: usize = 6;

/// Type into a simulated text field in the terminal
#[derive(Debug, Clone, Args)]
pub struct InteractiveArgs {
    /// Field capitalization mode (none, words, sentences, all_characters)
    #[arg(long, value_name = "MODE", default_value = "sentences")]
    pub capitalization: CapitalizationMode,
}

impl InteractiveArgs {
    /// Execute the interactive session
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;
        let catalog = KeyCatalog::load()
            .map_err(|e| CliError::io(format!("Failed to load key catalog: {e:#}")))?;

        let enhanced = setup_terminal()
            .map_err(|e| CliError::io(format!("Failed to set up terminal: {e:#}")))?;
        info!(key_release = enhanced, "interactive session started");

        let mut session = Session::new(&catalog, config, self.capitalization, enhanced);
        let result = session.run();

        restore_terminal(enhanced)
            .map_err(|e| CliError::io(format!("Failed to restore terminal: {e:#}")))?;
        result.map_err(|e| CliError::io(format!("{e:#}")))?;

        println!("{}", session.doc.text());
        Ok(())
    }
}

/// Enters raw mode and the alternate screen. Returns true if key release
/// events were enabled.
fn setup_terminal() -> Result<bool> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide).context("Failed to enter alternate screen")?;

    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("Failed to enable key release events")?;
    }
    Ok(enhanced)
}

fn restore_terminal(enhanced: bool) -> Result<()> {
    let mut stdout = io::stdout();
    if enhanced {
        execute!(stdout, PopKeyboardEnhancementFlags)
            .context("Failed to disable key release events")?;
    }
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(stdout, LeaveAlternateScreen, Show).context("Failed to leave alternate screen")?;
    Ok(())
}

struct Session<'a> {
    catalog: &'a KeyCatalog,
    player: Player<'a>,
    ctl: KeyboardController<TimerQueue, Config>,
    doc: MemoryDocument,
    enhanced: bool,
    started: Instant,
    recent: Vec<ControllerEvent>,
    status: String,
}

impl<'a> Session<'a> {
    fn new(
        catalog: &'a KeyCatalog,
        config: Config,
        capitalization: CapitalizationMode,
        enhanced: bool,
    ) -> Self {
        let mut ctl = KeyboardController::new(TimerQueue::new(), config)
            .with_backspace_timing(
                config.timing.backspace_delay(),
                config.timing.backspace_repeat(),
            )
            .with_feedback(Box::new(TerminalBell));
        let mut doc = MemoryDocument::new().with_capitalization(Some(capitalization));
        ctl.on_external_context_changed(&mut doc);

        Self {
            catalog,
            player: Player::new(catalog),
            ctl,
            doc,
            enhanced,
            started: Instant::now(),
            recent: Vec::new(),
            status: String::new(),
        }
    }

    fn run(&mut self) -> Result<()> {
        loop {
            self.catch_up_timers();
            self.render()?;

            // Poll faster while backspace is held so repeats land on time
            let timeout = if self.ctl.timers().pending() > 0 {
                Duration::from_millis(10)
            } else {
                Duration::from_millis(100)
            };

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_key(key) {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// Delivers every timer due by the wall clock.
    fn catch_up_timers(&mut self) {
        let elapsed = self.started.elapsed();
        let by = elapsed.saturating_sub(self.ctl.timers().now());
        if !by.is_zero() {
            self.ctl.advance(by, &mut self.doc);
            self.record_events();
        }
    }

    /// Handles one terminal key. Returns true to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.status.clear();

        if key.code == KeyCode::Backspace {
            self.handle_backspace(key.kind);
            return false;
        }

        // Held keys auto-repeat in the terminal; only fresh presses count
        if key.kind != KeyEventKind::Press {
            return false;
        }

        let step = match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char(c) => Step::Type(c),
            KeyCode::Enter => Step::Return,
            KeyCode::Tab => Step::Shift,
            KeyCode::BackTab => Step::ShiftDoubleTap,
            KeyCode::F(2) => Step::Mode((self.ctl.mode() + 1) % self.catalog.mode_count()),
            KeyCode::F(3) => Step::NextInputMode,
            KeyCode::F(4) => Step::Rotate,
            KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End => {
                self.move_cursor(key.code);
                Step::ContextChanged
            }
            _ => return false,
        };

        if let Err(e) = self.player.play_step(step, &mut self.ctl, &mut self.doc) {
            self.status = format!("{e:#}");
        }
        self.record_events();
        false
    }

    fn handle_backspace(&mut self, kind: KeyEventKind) {
        match (kind, self.enhanced) {
            (KeyEventKind::Press, true) => {
                self.ctl.on_key_touch_down();
                self.ctl.on_backspace_down(&mut self.doc);
            }
            (KeyEventKind::Release, true) => self.ctl.on_backspace_up(),
            (KeyEventKind::Press, false) => {
                self.ctl.on_key_touch_down();
                self.ctl.on_backspace_down(&mut self.doc);
                self.ctl.on_backspace_up();
            }
            _ => {}
        }
        self.record_events();
    }

    fn move_cursor(&mut self, code: KeyCode) {
        let cursor = self.doc.cursor();
        let end = self.doc.text().chars().count();
        let target = match code {
            KeyCode::Left => cursor.saturating_sub(1),
            KeyCode::Right => cursor + 1,
            KeyCode::Home => 0,
            _ => end,
        };
        self.doc.set_cursor(target);
    }

    fn record_events(&mut self) {
        self.recent.extend(self.player.take_events());
        self.recent.extend(self.ctl.drain_events());
        let overflow = self.recent.len().saturating_sub(EVENT_HISTORY);
        self.recent = self.recent.split_off(overflow);
    }

    fn render(&self) -> Result<()> {
        let mut stdout = io::stdout();
        let page = self
            .catalog
            .page(self.ctl.mode())
            .map_or("?", |page| page.name.as_str());

        let (before, after): (String, String) = {
            let split = self
                .doc
                .text()
                .char_indices()
                .nth(self.doc.cursor())
                .map_or(self.doc.text().len(), |(index, _)| index);
            let (before, after) = self.doc.text().split_at(split);
            (before.replace('\n', "⏎"), after.replace('\n', "⏎"))
        };

        let mut lines = vec![
            format!("> {before}|{after}"),
            String::new(),
            format!("shift: {}   page: {} ({page})", self.ctl.shift_state(), self.ctl.mode()),
            format!("backspace: {:?}", self.ctl.backspace_phase()),
            String::new(),
            "events:".to_string(),
        ];
        lines.extend(self.recent.iter().map(|event| format!("  {event:?}")));
        lines.push(String::new());
        if !self.status.is_empty() {
            lines.push(format!("! {}", self.status));
        }
        lines.push(
            "Tab shift · Shift+Tab caps lock · F2 next page · F3 next keyboard · F4 rotate · Esc quit"
                .to_string(),
        );

        queue!(stdout, Clear(ClearType::All))?;
        for (row, line) in lines.iter().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(stdout, MoveTo(0, row), Print(line))?;
        }
        stdout.flush()?;
        Ok(())
    }
}
