//! Countdown timer.
//!
//! [`Countdown`] is the bare one-second-per-tick counter shared with the
//! pomodoro cycle. [`CountdownTimer`] wraps it with the user-facing controls:
//! presets, manual adjustment, and a completion notification.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//! Running -> Completed -> (toggle) -> Idle
//! ```
//!
//! Like every widget in this crate the timer has no thread of its own; a
//! [`Driver`](crate::driver::Driver) or the caller invokes `tick()`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::driver::Tickable;
use crate::events::Event;
use crate::notify::{Notification, NotificationSink};
use crate::storage::CountdownConfig;

/// Shortest duration the timer can be configured to, in seconds.
pub const MIN_DURATION_SECS: u64 = 60;

/// Wall-clock time between two countdown ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Stopped with the full duration remaining.
    Idle,
    Running,
    /// Stopped part-way through.
    Paused,
    Completed,
}

/// A seconds counter that runs down to zero and then stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    total_secs: u64,
    remaining_secs: u64,
    running: bool,
    completed: bool,
}

impl Countdown {
    pub fn new(total_secs: u64) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
            running: false,
            completed: false,
        }
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn state(&self) -> TimerState {
        if self.completed {
            TimerState::Completed
        } else if self.running {
            TimerState::Running
        } else if self.remaining_secs == self.total_secs {
            TimerState::Idle
        } else {
            TimerState::Paused
        }
    }

    /// 0.0 .. 1.0 share of the duration already elapsed.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        (self.total_secs - self.remaining_secs) as f64 / self.total_secs as f64
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        self.running = running && !self.completed && self.remaining_secs > 0;
    }

    /// Load a new duration, stopped and not completed.
    pub(crate) fn reload(&mut self, total_secs: u64) {
        *self = Self::new(total_secs);
    }

    /// Advance by one second. Returns `true` on the tick that reaches zero.
    pub(crate) fn tick(&mut self) -> bool {
        if !self.running || self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.running = false;
            self.completed = true;
            return true;
        }
        false
    }
}

/// Primary control label, mirroring what a single start/pause button shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    Start,
    Pause,
    Reset,
}

/// User-facing countdown timer.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    config: CountdownConfig,
    countdown: Countdown,
    notifier: Arc<dyn NotificationSink>,
}

impl CountdownTimer {
    /// Create a stopped timer at the configured default duration.
    pub fn new(config: CountdownConfig, notifier: Arc<dyn NotificationSink>) -> Self {
        let countdown = Countdown::new(config.default_duration_secs.max(MIN_DURATION_SECS));
        Self {
            config,
            countdown,
            notifier,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn state(&self) -> TimerState {
        self.countdown.state()
    }

    pub fn configured_secs(&self) -> u64 {
        self.countdown.total_secs()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.countdown.remaining_secs()
    }

    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn is_completed(&self) -> bool {
        self.countdown.is_completed()
    }

    pub fn progress(&self) -> f64 {
        self.countdown.progress()
    }

    pub fn presets(&self) -> &[u64] {
        &self.config.presets_min
    }

    /// The preset whose duration equals the configured one, if any.
    pub fn active_preset(&self) -> Option<u64> {
        self.config
            .presets_min
            .iter()
            .copied()
            .find(|&m| m.saturating_mul(60) == self.configured_secs())
    }

    pub fn adjust_step_min(&self) -> u64 {
        self.config.adjust_step_min
    }

    pub fn can_adjust(&self) -> bool {
        !self.is_running()
    }

    pub fn can_decrease(&self) -> bool {
        self.can_adjust() && self.configured_secs() > MIN_DURATION_SECS
    }

    /// False when there is nothing to reset.
    pub fn can_reset(&self) -> bool {
        self.is_running() || self.remaining_secs() != self.configured_secs() || self.is_completed()
    }

    pub fn primary_action(&self) -> TimerAction {
        if self.is_completed() {
            TimerAction::Reset
        } else if self.is_running() {
            TimerAction::Pause
        } else {
            TimerAction::Start
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start counting. A completed timer is reset instead and stays stopped.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_completed() {
            return self.reset();
        }
        if self.is_running() {
            return None;
        }
        self.countdown.set_running(true);
        tracing::debug!(remaining_secs = self.remaining_secs(), "countdown started");
        Some(Event::TimerStarted {
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.countdown.set_running(false);
        tracing::debug!(remaining_secs = self.remaining_secs(), "countdown paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// The single start/pause/reset button.
    pub fn toggle(&mut self) -> Option<Event> {
        match self.primary_action() {
            TimerAction::Start => self.start(),
            TimerAction::Pause => self.pause(),
            TimerAction::Reset => self.reset(),
        }
    }

    /// Reload the configured duration. Returns `None` when already idle.
    pub fn reset(&mut self) -> Option<Event> {
        let total = self.configured_secs();
        if self.countdown == Countdown::new(total) {
            return None;
        }
        self.countdown.reload(total);
        Some(Event::TimerReset {
            duration_secs: total,
            at: Utc::now(),
        })
    }

    /// Change the configured duration by `delta_minutes`, never below one minute.
    /// Ignored while running.
    pub fn adjust(&mut self, delta_minutes: i64) -> Option<Event> {
        if !self.can_adjust() {
            return None;
        }
        let current = i64::try_from(self.configured_secs()).unwrap_or(i64::MAX);
        let proposed = current.saturating_add(delta_minutes.saturating_mul(60));
        let total = u64::try_from(proposed)
            .unwrap_or(0)
            .max(MIN_DURATION_SECS);
        self.set_configured(total)
    }

    /// Adjust up by the configured step.
    pub fn increase(&mut self) -> Option<Event> {
        self.adjust(i64::try_from(self.config.adjust_step_min).unwrap_or(i64::MAX))
    }

    /// Adjust down by the configured step.
    pub fn decrease(&mut self) -> Option<Event> {
        if !self.can_decrease() {
            return None;
        }
        self.adjust(-i64::try_from(self.config.adjust_step_min).unwrap_or(i64::MAX))
    }

    /// Set the configured duration to `minutes`. Ignored while running.
    pub fn apply_preset(&mut self, minutes: u64) -> Option<Event> {
        if !self.can_adjust() {
            return None;
        }
        self.set_configured(minutes.saturating_mul(60).max(MIN_DURATION_SECS))
    }

    /// Advance one second. Returns `Some(Event::TimerCompleted)` when the timer finishes.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.countdown.tick() {
            return None;
        }
        tracing::info!(duration_secs = self.configured_secs(), "countdown completed");
        self.notifier.notify(&Notification::new(
            "Timer Complete!",
            "Your focus session is finished.",
        ));
        Some(Event::TimerCompleted {
            duration_secs: self.configured_secs(),
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// `None` when the timer already sits idle at `total_secs`.
    fn set_configured(&mut self, total_secs: u64) -> Option<Event> {
        if self.countdown == Countdown::new(total_secs) {
            return None;
        }
        self.countdown.reload(total_secs);
        Some(Event::TimerAdjusted {
            duration_secs: total_secs,
            at: Utc::now(),
        })
    }
}

impl Tickable for CountdownTimer {
    fn period(&self) -> Duration {
        TICK_PERIOD
    }

    fn tick(&mut self) -> Option<Event> {
        CountdownTimer::tick(self)
    }

    fn is_running(&self) -> bool {
        CountdownTimer::is_running(self)
    }
}
