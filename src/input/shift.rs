//! Shift key gesture tracking: tap, tap-and-hold and double tap.
//!
//! A tap that starts from an uppercase state is resolved on release rather
//! than on press, so holding shift from Uppercased does not flip the case
//! twice. A double tap overrides whatever the pending single tap would do.

use crate::models::ShiftState;

/// Per-gesture record for the shift key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftGesture {
    /// No shift gesture in progress
    #[default]
    Idle,
    /// Shift is down; `starting` is the shift state at touch down
    Pressed {
        /// Shift state when the finger went down
        starting: ShiftState,
    },
    /// A double tap was recognized during this gesture; release is a no-op
    MultiTapped {
        /// Shift state at the most recent touch down, if any
        starting: Option<ShiftState>,
    },
}

/// Result of feeding a shift event through the gesture tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftOutcome {
    /// Shift state after the event
    pub state: ShiftState,
    /// True if the host should drop the caps-lock hint on the shift cap
    pub clear_lock_hint: bool,
}

impl ShiftOutcome {
    const fn unchanged(state: ShiftState) -> Self {
        Self {
            state,
            clear_lock_hint: false,
        }
    }

    const fn tapped(state: ShiftState) -> Self {
        Self {
            state: state.tapped(),
            clear_lock_hint: true,
        }
    }
}

impl ShiftGesture {
    /// Starting state recorded at touch down, if any.
    #[must_use]
    pub const fn starting_state(&self) -> Option<ShiftState> {
        match *self {
            Self::Idle => None,
            Self::Pressed { starting } => Some(starting),
            Self::MultiTapped { starting } => starting,
        }
    }

    /// True once a double tap has been recognized for this gesture.
    #[must_use]
    pub const fn was_multi_tapped(&self) -> bool {
        matches!(self, Self::MultiTapped { .. })
    }

    /// Forgets the gesture (page change, keyboard advance, rotation).
    pub fn clear(&mut self) {
        *self = Self::Idle;
    }

    /// Shift touched down while in `current`.
    ///
    /// From a lowercase state the tap applies immediately; from an uppercase
    /// state it is deferred to [`ShiftGesture::release`].
    pub fn press(&mut self, current: ShiftState) -> ShiftOutcome {
        *self = match *self {
            Self::MultiTapped { .. } => Self::MultiTapped {
                starting: Some(current),
            },
            Self::Idle | Self::Pressed { .. } => Self::Pressed { starting: current },
        };

        if current.is_uppercased() {
            ShiftOutcome::unchanged(current)
        } else {
            ShiftOutcome::tapped(current)
        }
    }

    /// Shift released inside the key while in `current`.
    pub fn release(&mut self, current: ShiftState) -> ShiftOutcome {
        let outcome = match *self {
            Self::Pressed { starting } if starting.is_uppercased() => ShiftOutcome::tapped(current),
            Self::Idle | Self::Pressed { .. } | Self::MultiTapped { .. } => {
                ShiftOutcome::unchanged(current)
            }
        };

        self.clear();
        outcome
    }

    /// Second touch down within the double-tap window.
    pub fn double_tap(&mut self, current: ShiftState) -> ShiftOutcome {
        *self = Self::MultiTapped {
            starting: self.starting_state(),
        };

        ShiftOutcome::unchanged(current.double_tapped())
    }
}
