//! Key catalog: the pages of keys a keyboard offers.
//!
//! The default catalog is embedded in the binary at compile time from
//! `pages.json`: a letters page, a numbers page and a symbols page.

use crate::models::{Key, KeyKind};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Key entry as written in the catalog file.
///
/// `letter` sets both outputs from one letter; `output` sets a
/// case-independent output; `uppercase` overrides the uppercase side.
#[derive(Debug, Clone, Deserialize)]
struct KeySpec {
    kind: KeyKind,
    #[serde(default)]
    letter: Option<String>,
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    uppercase: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

impl KeySpec {
    fn into_key(self) -> Key {
        let mut key = match (self.letter, self.output) {
            (Some(letter), _) => Key::new(self.kind).with_letter(letter),
            (None, Some(output)) => Key::with_output(self.kind, output),
            (None, None) => Key::new(self.kind),
        };

        if let Some(uppercase) = self.uppercase {
            key.uppercase_output = Some(uppercase);
        }
        key.label = self.label;
        key
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PageSpec {
    name: String,
    rows: Vec<Vec<KeySpec>>,
}

/// Catalog schema.
#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    version: String,
    pages: Vec<PageSpec>,
}

/// One page of keys, laid out in rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Page name (e.g., "letters", "numbers")
    pub name: String,
    /// Rows of keys, top to bottom
    pub rows: Vec<Vec<Key>>,
}

impl Page {
    /// All keys on the page, row by row.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.rows.iter().flatten()
    }
}

/// The set of pages available to the keyboard, indexed by mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCatalog {
    version: String,
    pages: Vec<Page>,
}

impl KeyCatalog {
    /// Loads the embedded default catalog.
    pub fn load() -> Result<Self> {
        Self::from_json(include_str!("pages.json"))
            .context("Failed to load embedded key catalog")
    }

    /// Parses and validates a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, there are no pages, or a
    /// mode change key points at a page that does not exist.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).context("Failed to parse key catalog JSON")?;

        let pages: Vec<Page> = file
            .pages
            .into_iter()
            .map(|page| Page {
                name: page.name,
                rows: page
                    .rows
                    .into_iter()
                    .map(|row| row.into_iter().map(KeySpec::into_key).collect())
                    .collect(),
            })
            .collect();

        let catalog = Self {
            version: file.version,
            pages,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        if self.pages.is_empty() {
            anyhow::bail!("Key catalog has no pages");
        }

        for (mode, page) in self.pages.iter().enumerate() {
            for key in page.keys() {
                if let Some(target) = key.to_mode() {
                    if target >= self.pages.len() {
                        anyhow::bail!(
                            "Key '{}' on page {} ('{}') switches to page {}, but only {} pages exist",
                            key.display_label(),
                            mode,
                            page.name,
                            target,
                            self.pages.len()
                        );
                    }
                }

                if key.kind == KeyKind::Character && !key.has_output() {
                    anyhow::bail!(
                        "Character key on page {} ('{}') has no output",
                        mode,
                        page.name
                    );
                }
            }
        }

        Ok(())
    }

    /// Catalog schema version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of pages.
    #[must_use]
    pub fn mode_count(&self) -> usize {
        self.pages.len()
    }

    /// All pages in mode order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Page for a mode.
    #[must_use]
    pub fn page(&self, mode: usize) -> Option<&Page> {
        self.pages.get(mode)
    }

    /// Finds the key that types `output`.
    ///
    /// The page for `mode` is searched first, then every other page in
    /// order. Letters match either case, since case comes from the shift
    /// state rather than the key.
    #[must_use]
    pub fn find_by_output(&self, mode: usize, output: &str) -> Option<(usize, &Key)> {
        let matches = |key: &Key| {
            key.lowercase_output.as_deref() == Some(output)
                || key.uppercase_output.as_deref() == Some(output)
        };

        self.find(mode, matches)
    }

    /// Finds the first key of `kind`, preferring the page for `mode`.
    #[must_use]
    pub fn find_by_kind(&self, mode: usize, kind: KeyKind) -> Option<(usize, &Key)> {
        self.find(mode, |key| key.kind == kind)
    }

    /// Finds a key by its label (case-insensitive), preferring the page for
    /// `mode`.
    #[must_use]
    pub fn find_by_label(&self, mode: usize, label: &str) -> Option<(usize, &Key)> {
        self.find(mode, |key| {
            key.label
                .as_deref()
                .is_some_and(|l| l.eq_ignore_ascii_case(label))
        })
    }

    fn find(&self, mode: usize, predicate: impl Fn(&Key) -> bool) -> Option<(usize, &Key)> {
        let preferred = self.page(mode).into_iter().map(|page| (mode, page));
        let others = self
            .pages
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != mode);

        preferred
            .chain(others)
            .find_map(|(index, page)| page.keys().find(|key| predicate(key)).map(|key| (index, key)))
    }
}
