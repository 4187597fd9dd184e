//! Softkey
//!
//! Input handling core for an on-screen keyboard: shift and caps lock,
//! automatic capitalization, the double-space period shortcut, hold-to-repeat
//! backspace and switching between letter and symbol pages.
//!
//! The host owns the text field and the clock. It feeds touch events to a
//! [`input::KeyboardController`], passes the focused field as a
//! [`document::TextDocument`], delivers fired timers back to the controller,
//! and redraws when [`input::ControllerEvent`]s come out of
//! [`input::KeyboardController::drain_events`].
//!
//! ```
//! use softkey::document::MemoryDocument;
//! use softkey::input::KeyboardController;
//! use softkey::models::Key;
//! use softkey::preferences::Preferences;
//! use softkey::timer::TimerQueue;
//!
//! let mut doc = MemoryDocument::new();
//! let mut ctl = KeyboardController::new(TimerQueue::new(), Preferences::default());
//! ctl.on_external_context_changed(&mut doc);
//!
//! for letter in ["h", "i"] {
//!     ctl.on_key_pressed(&Key::letter(letter), &mut doc);
//! }
//! assert_eq!(doc.text(), "Hi");
//! ```

// Module declarations
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod document;
pub mod feedback;
pub mod input;
pub mod models;
pub mod preferences;
pub mod script;
pub mod timer;
