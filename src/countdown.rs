//! Drift-corrected countdown component for Bubble Tea applications.
//!
//! The countdown counts toward a fixed [`TargetInstant`] and recomputes the
//! full remaining duration from the wall clock on every tick. Because no
//! per-tick delta is ever accumulated, scheduling jitter in the host timer
//! cannot compound into display error: the result depends only on the
//! current time, never on how regularly ticks were delivered. This is the
//! property that separates it from a naive "subtract one second per tick"
//! timer.
//!
//! # Basic Usage
//!
//! ```rust
//! use bigday_widgets::countdown::{new, TargetInstant};
//! use std::time::{Duration, SystemTime};
//!
//! // Count down to a fixed instant one week away.
//! let target = TargetInstant::new(SystemTime::now() + Duration::from_secs(7 * 86_400));
//! let countdown = new(target);
//! assert!(countdown.running());
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Model as BubbleTeaModel, Msg, Cmd};
//! use bigday_widgets::countdown::{new, Model, ExpiredMsg, TargetInstant};
//! use std::time::{Duration, SystemTime};
//!
//! struct App {
//!     countdown: Model,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let target = TargetInstant::new(SystemTime::now() + Duration::from_secs(60));
//!         let countdown = new(target);
//!         let cmd = countdown.init();
//!         (Self { countdown }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(expired) = msg.downcast_ref::<ExpiredMsg>() {
//!             if expired.id == self.countdown.id() {
//!                 // The big moment. Ticking has already stopped.
//!             }
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.countdown.view()
//!     }
//! }
//! ```
//!
//! The engine itself ([`Engine`]) is usable without the widget wrapper when
//! a host owns its own scheduling; `tick` takes the current time explicitly
//! so tests can drive it with a [`crate::clock::ManualClock`].

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use lipgloss_extras::prelude::*;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, SystemTime};

use crate::clock::{system_clock, SharedClock};

// Internal ID management for countdown instances, shared-nothing with the
// other components' counters.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_DAY: u64 = 86_400;

/// The four display units of the countdown board, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Whole days remaining; unbounded, shrinking ring.
    Days,
    /// Hours within the current day (0–23).
    Hours,
    /// Minutes within the current hour (0–59).
    Minutes,
    /// Seconds within the current minute (0–59).
    Seconds,
}

impl Unit {
    /// All units in display order.
    pub const ALL: [Unit; 4] = [Unit::Days, Unit::Hours, Unit::Minutes, Unit::Seconds];

    /// Lowercase label for the unit.
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Days => "days",
            Unit::Hours => "hours",
            Unit::Minutes => "minutes",
            Unit::Seconds => "seconds",
        }
    }

    /// The cycle length used for the unit's ring fraction: hours run over
    /// a 24 cycle, minutes and seconds over 60. Days are acyclic — their
    /// ring shrinks toward zero instead of wrapping — so they have none.
    pub fn cycle(&self) -> Option<u64> {
        match self {
            Unit::Days => None,
            Unit::Hours => Some(24),
            Unit::Minutes | Unit::Seconds => Some(60),
        }
    }

    fn index(&self) -> usize {
        match self {
            Unit::Days => 0,
            Unit::Hours => 1,
            Unit::Minutes => 2,
            Unit::Seconds => 3,
        }
    }
}

/// The instant the countdown counts toward. Fixed at construction and never
/// mutated; a countdown cannot be retargeted, only rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetInstant(SystemTime);

impl TargetInstant {
    /// Fixes the target at `at`.
    pub fn new(at: SystemTime) -> Self {
        Self(at)
    }

    /// Builds a target from whole seconds since the Unix epoch.
    pub fn from_unix_secs(secs: u64) -> Self {
        Self(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
    }

    /// The underlying instant.
    pub fn instant(&self) -> SystemTime {
        self.0
    }
}

/// Remaining time decomposed into display units.
///
/// Derived by flooring the total remaining duration to whole seconds, then
/// dividing through days/hours/minutes. Invariants: `hours < 24`,
/// `minutes < 60`, `seconds < 60`; `days` is unbounded.
///
/// # Examples
///
/// ```rust
/// use bigday_widgets::countdown::Remaining;
///
/// let r = Remaining::from_secs(3_661);
/// assert_eq!((r.days, r.hours, r.minutes, r.seconds), (0, 1, 1, 1));
/// assert_eq!(r.total_secs(), 3_661);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    /// Whole days remaining.
    pub days: u64,
    /// Hours remaining within the current day.
    pub hours: u64,
    /// Minutes remaining within the current hour.
    pub minutes: u64,
    /// Seconds remaining within the current minute.
    pub seconds: u64,
}

impl Remaining {
    /// Decomposes a whole-second count into display units.
    pub fn from_secs(total: u64) -> Self {
        Self {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        }
    }

    /// Reconstructs the whole-second count the breakdown was derived from.
    pub fn total_secs(&self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }

    /// The numeric value for one display unit.
    pub fn value(&self, unit: Unit) -> u64 {
        match unit {
            Unit::Days => self.days,
            Unit::Hours => self.hours,
            Unit::Minutes => self.minutes,
            Unit::Seconds => self.seconds,
        }
    }

    /// The zero-padded display string for a unit. Change detection compares
    /// these strings, so a unit only animates when its rendered text moves.
    pub fn padded(&self, unit: Unit) -> String {
        format!("{:02}", self.value(unit))
    }
}

/// Outcome of a single engine tick.
///
/// `Expired` is terminal for presentation purposes: once a caller observes
/// it, it cancels its tick schedule (see [`Model`]) and the countdown never
/// returns to `Remaining` under forward-moving time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownResult {
    /// Time is left; here is the breakdown.
    Remaining(Remaining),
    /// The target has been reached or passed.
    Expired,
}

impl CountdownResult {
    /// Whether this tick observed expiry.
    pub fn is_expired(&self) -> bool {
        matches!(self, CountdownResult::Expired)
    }
}

/// Per-unit ring fractions in [0, 1], indexed by [`Unit`].
///
/// Hours, minutes and seconds are cyclic (value over cycle length). Days
/// shrink monotonically: current days over the initial-days snapshot taken
/// on the engine's first non-expired tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UnitFractions([f64; 4]);

impl UnitFractions {
    /// The fraction for one unit, in [0, 1].
    pub fn get(&self, unit: Unit) -> f64 {
        self.0[unit.index()]
    }
}

/// Receives countdown updates for rendering. Implemented by hosts; the
/// engine has no opinion about what a digit or a ring looks like.
pub trait RenderAdapter {
    /// Called once per published tick with the tick outcome, the units
    /// whose rendered text changed, and the ring fractions.
    fn on_tick(&mut self, result: &CountdownResult, changed: &[Unit], fractions: &UnitFractions);
}

/// The countdown computation core.
///
/// Holds the fixed target plus per-unit render state: the last rendered
/// string for each unit and the initial-days snapshot. It deliberately
/// holds no notion of "elapsed ticks" — `tick` is a pure function of the
/// `now` it is handed, which is what makes the component immune to timer
/// drift and indifferent to clock regression.
///
/// # Examples
///
/// ```rust
/// use bigday_widgets::countdown::{CountdownResult, Engine, TargetInstant};
/// use std::time::{Duration, SystemTime};
///
/// let target = SystemTime::UNIX_EPOCH + Duration::from_secs(10_000);
/// let mut engine = Engine::new(TargetInstant::new(target));
///
/// let result = engine.tick(target - Duration::from_secs(3_661));
/// match result {
///     CountdownResult::Remaining(r) => assert_eq!(r.hours, 1),
///     CountdownResult::Expired => unreachable!(),
/// }
/// assert_eq!(engine.tick(target), CountdownResult::Expired);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    target: TargetInstant,
    initial_days: Option<u64>,
    rendered: [Option<String>; 4],
    changed: [bool; 4],
    fractions: UnitFractions,
}

impl Engine {
    /// An engine counting toward `target`, with no render state yet.
    pub fn new(target: TargetInstant) -> Self {
        Self {
            target,
            initial_days: None,
            rendered: [None, None, None, None],
            changed: [false; 4],
            fractions: UnitFractions::default(),
        }
    }

    /// The instant this engine counts toward.
    pub fn target(&self) -> TargetInstant {
        self.target
    }

    /// The days count captured on the first non-expired tick, used as the
    /// denominator of the shrinking days ring. `None` until that tick.
    pub fn initial_days(&self) -> Option<u64> {
        self.initial_days
    }

    /// Computes the countdown state at `now`.
    ///
    /// The full signed difference `target - now` is recomputed from scratch
    /// each call. A difference of zero or less yields
    /// [`CountdownResult::Expired`]; otherwise the difference is floored to
    /// whole seconds and decomposed into [`Remaining`].
    ///
    /// `now` may move backwards between calls; the engine simply recomputes.
    /// It is the caller's job to stop scheduling ticks after observing
    /// `Expired` (the widget wrapper does this).
    pub fn tick(&mut self, now: SystemTime) -> CountdownResult {
        let diff = match self.target.0.duration_since(now) {
            Ok(diff) if !diff.is_zero() => diff,
            _ => {
                // Nothing left to animate once the board switches to its
                // terminal face.
                self.changed = [false; 4];
                self.fractions = UnitFractions::default();
                return CountdownResult::Expired;
            }
        };

        let remaining = Remaining::from_secs(diff.as_secs());

        // Snapshot the denominator for the days ring exactly once.
        if self.initial_days.is_none() {
            self.initial_days = Some(remaining.days);
        }

        for unit in Unit::ALL {
            let text = remaining.padded(unit);
            let slot = &mut self.rendered[unit.index()];
            self.changed[unit.index()] = slot.as_deref() != Some(text.as_str());
            *slot = Some(text);
        }

        self.fractions = self.compute_fractions(&remaining);

        CountdownResult::Remaining(remaining)
    }

    fn compute_fractions(&self, remaining: &Remaining) -> UnitFractions {
        let mut out = [0.0; 4];
        for unit in Unit::ALL {
            out[unit.index()] = match unit.cycle() {
                Some(cycle) => remaining.value(unit) as f64 / cycle as f64,
                None => match self.initial_days {
                    Some(initial) if initial > 0 => remaining.days as f64 / initial as f64,
                    // A target under a day away starts with a drained ring.
                    _ => 0.0,
                },
            };
        }
        UnitFractions(out)
    }

    /// Whether the unit's rendered text changed on the most recent tick.
    /// Units that have never been rendered count as changed.
    pub fn changed(&self, unit: Unit) -> bool {
        self.changed[unit.index()]
    }

    /// The units whose rendered text changed on the most recent tick, in
    /// display order.
    pub fn changed_units(&self) -> Vec<Unit> {
        Unit::ALL
            .into_iter()
            .filter(|u| self.changed[u.index()])
            .collect()
    }

    /// Ring fractions as of the most recent tick.
    pub fn fractions(&self) -> UnitFractions {
        self.fractions
    }

    /// Ring fraction for one unit as of the most recent tick.
    pub fn fraction(&self, unit: Unit) -> f64 {
        self.fractions.get(unit)
    }

    /// The unit's last rendered string, if any tick has produced one.
    pub fn rendered(&self, unit: Unit) -> Option<&str> {
        self.rendered[unit.index()].as_deref()
    }

    /// Ticks and forwards the outcome to a render adapter. Hosts that wire
    /// no adapter simply call [`Engine::tick`] instead; there is no failure
    /// mode either way.
    pub fn publish(&mut self, now: SystemTime, adapter: &mut dyn RenderAdapter) -> CountdownResult {
        let result = self.tick(now);
        let changed = self.changed_units();
        adapter.on_tick(&result, &changed, &self.fractions);
        result
    }
}

/// Message sent on every scheduled countdown tick.
///
/// Carries the owning model's `id` plus an internal `tag` so a model never
/// processes a stale or foreign tick (same filtering scheme as the other
/// self-scheduling components).
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The unique identifier of the countdown that scheduled this tick.
    pub id: i64,
    tag: i64,
}

/// Sent exactly once, when the countdown first observes expiry.
///
/// By the time a host sees this message the model has already canceled its
/// tick schedule; there is nothing to clean up.
#[derive(Debug, Clone)]
pub struct ExpiredMsg {
    /// The unique identifier of the countdown that expired.
    pub id: i64,
}

/// Countdown widget: the [`Engine`] plus tick scheduling, one-shot expiry
/// and a styled view.
///
/// The widget schedules itself at a fixed nominal `interval` (default one
/// second). The interval controls how often the display refreshes, not
/// what it shows — each tick re-reads the clock, so a late tick simply
/// renders the correct, current value.
///
/// There is intentionally no start/stop/toggle: the countdown is one-shot.
/// Upon observing expiry it cancels its schedule, emits [`ExpiredMsg`], and
/// rejects any stray in-flight ticks. Cancellation is idempotent.
#[derive(Debug, Clone)]
pub struct Model {
    engine: Engine,

    /// Nominal period between display refreshes.
    pub interval: Duration,

    /// Styles the numeric digits.
    pub digit_style: Style,
    /// Styles the separators and unit labels.
    pub label_style: Style,
    /// Literal text shown once the countdown has expired.
    pub expired_text: String,

    clock: SharedClock,
    id: i64,
    tag: i64,
    running: bool,
    done: bool,
}

/// Creates a countdown to `target` with the default 1-second refresh.
pub fn new(target: TargetInstant) -> Model {
    new_with_interval(target, Duration::from_secs(1))
}

/// Creates a countdown with a custom refresh interval.
///
/// A finer interval only makes the display react faster; remaining time is
/// always recomputed from the clock, so accuracy is identical at any
/// interval.
pub fn new_with_interval(target: TargetInstant, interval: Duration) -> Model {
    Model {
        engine: Engine::new(target),
        interval,
        digit_style: Style::new().bold(true),
        label_style: Style::new().foreground(Color::from("240")),
        expired_text: "The big day is here!".to_string(),
        clock: system_clock(),
        id: next_id(),
        tag: 0,
        running: true,
        done: false,
    }
}

impl Model {
    /// The unique identifier of this countdown instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Replaces the clock the widget reads on each tick. Primarily for
    /// deterministic tests and demos.
    pub fn set_clock(&mut self, clock: SharedClock) {
        self.clock = clock;
    }

    /// Read access to the engine for custom render adapters.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Whether the tick schedule is still live.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Whether expiry has been observed. Never reverts.
    pub fn expired(&self) -> bool {
        self.done
    }

    /// Starts the tick schedule. The first tick fires immediately so the
    /// board renders without waiting a full interval.
    pub fn init(&self) -> Cmd {
        self.tick_cmd(Duration::ZERO)
    }

    /// Cancels the tick schedule. Safe to call any number of times; stray
    /// ticks already in flight are rejected by the running check.
    pub fn cancel(&mut self) {
        self.running = false;
    }

    fn tick_cmd(&self, delay: Duration) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(delay, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn expired_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::ZERO, move |_| Box::new(ExpiredMsg { id }) as Msg)
    }

    /// Processes tick messages: recomputes from the clock, reschedules
    /// while time remains, and performs the one-shot expiry transition.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if !self.running || (tick_msg.id != 0 && tick_msg.id != self.id) {
                return None;
            }

            // Reject stale ticks so a backlog can never fast-forward the
            // schedule (same tag scheme as the other ticking components).
            if tick_msg.tag > 0 && tick_msg.tag != self.tag {
                return None;
            }

            return match self.engine.tick(self.clock.now()) {
                CountdownResult::Remaining(_) => {
                    self.tag += 1;
                    Some(self.tick_cmd(self.interval))
                }
                CountdownResult::Expired => {
                    self.cancel();
                    self.done = true;
                    Some(self.expired_cmd())
                }
            };
        }

        None
    }

    /// Renders the board as `DDd HH:MM:SS`, or the expired text once done.
    pub fn view(&self) -> String {
        if self.done {
            return self.digit_style.render(&self.expired_text);
        }

        let part = |unit: Unit| {
            self.engine
                .rendered(unit)
                .map(str::to_string)
                .unwrap_or_else(|| "--".to_string())
        };

        format!(
            "{}{} {}{}{}{}{}",
            self.digit_style.render(&part(Unit::Days)),
            self.label_style.render("d"),
            self.digit_style.render(&part(Unit::Hours)),
            self.label_style.render(":"),
            self.digit_style.render(&part(Unit::Minutes)),
            self.label_style.render(":"),
            self.digit_style.render(&part(Unit::Seconds)),
        )
    }
}

impl BubbleTeaModel for Model {
    /// Standalone default: a 24-hour countdown starting now.
    fn init() -> (Self, Option<Cmd>) {
        let target = TargetInstant::new(SystemTime::now() + Duration::from_secs(SECS_PER_DAY));
        let model = new(target);
        let cmd = model.init();
        (model, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
