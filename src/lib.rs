#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bigday-widgets/")]

//! # bigday-widgets
//!
//! TUI components for a "big day" event page, built for
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs): a
//! drift-corrected countdown board, a faux-terminal guest console, and the
//! small pieces of chrome around them (celebration triggers, a rotating
//! status line).
//!
//! ## Overview
//!
//! Every component follows the Elm Architecture pattern with `init()`,
//! `update()`, and `view()` methods, so they compose into bubbletea-rs
//! applications the same way as any other widget.
//!
//! The two headline components:
//!
//! - **Countdown** (`countdown`): counts toward a fixed target instant by
//!   recomputing the remaining duration from the wall clock on every tick.
//!   No per-tick state is accumulated, so timer jitter never drifts the
//!   display, and a clock that jumps backwards is recomputed, not an
//!   error. Expiry is one-shot: the tick schedule is canceled exactly once
//!   and the countdown never restarts.
//! - **Console** (`console`): a bounded-history, bounded-output command
//!   interpreter with a fixed, case-insensitive keyword set. Unknown
//!   commands are answers, not errors.
//!
//! Time is injected through the `clock` module so both components can be
//! driven deterministically in tests.
//!
//! ## Quick Start
//!
//! ```rust
//! use bigday_widgets::prelude::*;
//! use bubbletea_rs::{Model, Cmd, Msg};
//! use std::time::{Duration, SystemTime};
//!
//! struct App {
//!     countdown: Countdown,
//!     console: Console,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let target = TargetInstant::new(
//!             SystemTime::now() + Duration::from_secs(30 * 86_400),
//!         );
//!         let countdown = countdown_new(target);
//!         let cmd = countdown.init();
//!
//!         let mut console = console_new();
//!         console.focus();
//!
//!         (Self { countdown, console }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         // Keys go to the console; everything else (ticks, expiry) is
//!         // the countdown's.
//!         if msg.downcast_ref::<bubbletea_rs::KeyMsg>().is_some() {
//!             return self.console.update(msg);
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("{}\n\n{}", self.countdown.view(), self.console.view())
//!     }
//! }
//! ```
//!
//! ## Components
//!
//! | Component | Description | Use Case |
//! |-----------|-------------|----------|
//! | `Countdown` | Drift-corrected countdown board | The hero timer |
//! | `Console` | Faux-terminal with fixed commands | Guest easter egg |
//! | `Scheduler` | Once-per-section celebration bursts | Confetti triggers |
//! | `StatusRotation` | Cycling one-line status display | Footer flavor text |
//! | `BoundedBuffer` | Fixed-capacity FIFO log | History/output buffers |

pub mod celebration;
pub mod clock;
pub mod console;
pub mod countdown;
pub mod history;
pub mod key;
pub mod status;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// Only a focused component consumes key messages; a blurred one lets
/// them pass. `focus()` may return a command for initialization work
/// (the console uses it to start its session).
pub trait Component {
    /// Sets the component to focused state.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use celebration::{Burst, Scheduler};
pub use clock::{system_clock, Clock, ManualClock, SharedClock, SystemClock};
pub use console::{
    new as console_new, Action, CommandSet, CommandSpec, KeyMap as ConsoleKeyMap,
    Model as Console, OutputLine, OutputSink, Phase, EVENT_COMMANDS, HISTORY_CAPACITY,
    OUTPUT_CAPACITY,
};
pub use countdown::{
    new as countdown_new, new_with_interval as countdown_new_with_interval,
    CountdownResult, Engine, ExpiredMsg, Model as Countdown, Remaining, RenderAdapter,
    TargetInstant, TickMsg as CountdownTickMsg, Unit, UnitFractions,
};
pub use history::BoundedBuffer;
pub use key::{matches_binding, Binding};
pub use status::StatusRotation;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use bigday_widgets::prelude::*;
/// ```
pub mod prelude {
    pub use crate::celebration::{Burst, Scheduler};
    pub use crate::clock::{system_clock, Clock, ManualClock, SharedClock, SystemClock};
    pub use crate::console::{
        new as console_new, Action, CommandSet, CommandSpec, Model as Console, OutputLine,
        OutputSink, Phase, EVENT_COMMANDS,
    };
    pub use crate::countdown::{
        new as countdown_new, new_with_interval as countdown_new_with_interval,
        CountdownResult, Engine, ExpiredMsg, Model as Countdown, Remaining, RenderAdapter,
        TargetInstant, Unit, UnitFractions,
    };
    pub use crate::history::BoundedBuffer;
    pub use crate::key::{matches_binding, Binding};
    pub use crate::status::StatusRotation;
    pub use crate::Component;
}
