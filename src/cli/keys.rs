//! Key catalog listing command.

use crate::catalog::{KeyCatalog, Page};
use crate::cli::common::{CliError, CliResult};
use crate::models::{Key, KeyKind, ShiftState};
use clap::Args;
use serde::Serialize;

/// List the keys on each keyboard page
#[derive(Debug, Clone, Args)]
pub struct KeysArgs {
    /// Only show this page (0 = letters)
    #[arg(long, value_name = "N")]
    pub mode: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct KeysOutput<'a> {
    version: &'a str,
    pages: Vec<PageOutput<'a>>,
}

#[derive(Debug, Serialize)]
struct PageOutput<'a> {
    mode: usize,
    name: &'a str,
    rows: &'a [Vec<Key>],
}

impl KeysArgs {
    /// Execute the keys command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = KeyCatalog::load()
            .map_err(|e| CliError::io(format!("Failed to load key catalog: {e:#}")))?;

        let pages: Vec<(usize, &Page)> = match self.mode {
            Some(mode) => {
                let page = catalog.page(mode).ok_or_else(|| {
                    CliError::validation(format!(
                        "Page {mode} does not exist (valid pages: 0-{})",
                        catalog.mode_count() - 1
                    ))
                })?;
                vec![(mode, page)]
            }
            None => catalog.pages().iter().enumerate().collect(),
        };

        if self.json {
            let output = KeysOutput {
                version: catalog.version(),
                pages: pages
                    .iter()
                    .map(|(mode, page)| PageOutput {
                        mode: *mode,
                        name: &page.name,
                        rows: &page.rows,
                    })
                    .collect(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&output)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            for (mode, page) in pages {
                println!("Page {mode}: {}", page.name);
                for row in &page.rows {
                    let caps: Vec<String> = row.iter().map(key_cap).collect();
                    println!("  {}", caps.join(" "));
                }
                println!();
            }
        }

        Ok(())
    }
}

/// Bracketed cap text for one key, e.g. `[q]`, `[123>1]`.
fn key_cap(key: &Key) -> String {
    match key.kind {
        KeyKind::ModeChange { to_mode } => format!("[{}>{to_mode}]", key.display_label()),
        KeyKind::Character | KeyKind::SpecialCharacter | KeyKind::Period => {
            format!("[{}]", key.output_for_case(ShiftState::Lowercased))
        }
        _ => format!("[{}]", key.display_label()),
    }
}
