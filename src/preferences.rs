//! User preferences read by the input controller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The boolean options the controller consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    /// Capitalize automatically at word/sentence starts
    AutoCapitalization,
    /// Turn a double space after a word into ". "
    AutoPeriod,
    /// Play a click on key touch down
    KeyClicks,
}

impl PreferenceKey {
    /// All keys, in declaration order.
    pub const ALL: [Self; 3] = [Self::AutoCapitalization, Self::AutoPeriod, Self::KeyClicks];

    /// Name used in the config file and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AutoCapitalization => "auto_capitalization",
            Self::AutoPeriod => "auto_period",
            Self::KeyClicks => "key_clicks",
        }
    }

    /// Value used when nothing has been configured.
    #[must_use]
    pub const fn default_value(self) -> bool {
        match self {
            Self::AutoCapitalization | Self::AutoPeriod => true,
            Self::KeyClicks => false,
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PreferenceKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|key| key.name() == normalized)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown preference '{}'. Expected one of: auto_capitalization, auto_period, key_clicks",
                    s
                )
            })
    }
}

/// Read-only source of boolean preferences.
pub trait PreferencesSource {
    /// Current value of a preference.
    fn get_bool(&self, key: PreferenceKey) -> bool;
}

/// Plain preference values, stored as the `[input]` section of the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Auto-capitalization enabled
    #[serde(default = "default_true")]
    pub auto_capitalization: bool,
    /// Double-space period shortcut enabled
    #[serde(default = "default_true")]
    pub auto_period: bool,
    /// Key click sound enabled
    #[serde(default)]
    pub key_clicks: bool,
}

/// Default for options that start enabled
const fn default_true() -> bool {
    true
}

impl Preferences {
    /// Sets one preference.
    pub fn set(&mut self, key: PreferenceKey, value: bool) {
        match key {
            PreferenceKey::AutoCapitalization => self.auto_capitalization = value,
            PreferenceKey::AutoPeriod => self.auto_period = value,
            PreferenceKey::KeyClicks => self.key_clicks = value,
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_capitalization: PreferenceKey::AutoCapitalization.default_value(),
            auto_period: PreferenceKey::AutoPeriod.default_value(),
            key_clicks: PreferenceKey::KeyClicks.default_value(),
        }
    }
}

impl PreferencesSource for Preferences {
    fn get_bool(&self, key: PreferenceKey) -> bool {
        match key {
            PreferenceKey::AutoCapitalization => self.auto_capitalization,
            PreferenceKey::AutoPeriod => self.auto_period,
            PreferenceKey::KeyClicks => self.key_clicks,
        }
    }
}
