//! Faux-terminal console component.
//!
//! A small REPL surface for the event page: guests type one of a fixed set
//! of keywords and the console answers from its command table. It keeps a
//! bounded command history (newest 20 submissions, consecutive duplicates
//! collapsed) and a bounded output log (newest 8 lines), both FIFO.
//!
//! # Basic Usage
//!
//! ```rust
//! use bigday_widgets::console::new;
//! use bigday_widgets::Component;
//!
//! let mut console = new();
//! console.focus();
//!
//! console.execute("venue");
//! console.execute("xyzzy"); // unknown keywords answer politely
//! assert!(console.history_entries().count() == 2);
//! ```
//!
//! Dispatch is case-insensitive and exact; commands take no arguments.
//! History is navigated with the up/down bindings, which only replace the
//! pending input — nothing runs until submit.

pub mod command;
pub mod keymap;
pub mod model;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use command::{Action, CommandSet, CommandSpec, EVENT_COMMANDS};
pub use keymap::{default_key_map, KeyMap};
pub use model::{new, Model, HISTORY_CAPACITY, OUTPUT_CAPACITY};
pub use types::{OutputLine, OutputSink, Phase};
