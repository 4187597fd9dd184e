//! Data models for keys and shift state.
//!
//! These types are shared by the key catalog and the input controller and
//! carry no behaviour beyond their own transition rules.

pub mod key;
pub mod shift;

// Re-export all model types
pub use key::{Key, KeyKind};
pub use shift::ShiftState;
