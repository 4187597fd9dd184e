//! Input state machine.
//!
//! [`KeyboardController`] receives key events from the host and drives the
//! pieces below:
//!
//! - [`shift`]: tap, hold and double-tap handling for the shift key
//! - [`autocap`]: whether the next character should be capitalized
//! - [`autoperiod`]: the double-space period shortcut
//! - [`backspace`]: hold-to-repeat delete timing
//! - [`mode`]: the active catalog page

pub mod autocap;
pub mod autoperiod;
pub mod backspace;
pub mod controller;
pub mod mode;
pub mod shift;

pub use autocap::should_capitalize;
pub use autoperiod::{AutoPeriod, AutoPeriodState};
pub use backspace::{BackspacePhase, BackspaceRepeater, DEFAULT_INITIAL_DELAY, DEFAULT_REPEAT_INTERVAL};
pub use controller::{ControllerEvent, KeyboardController};
pub use mode::{ModeController, LETTERS_MODE};
pub use shift::{ShiftGesture, ShiftOutcome};
