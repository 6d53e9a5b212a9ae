//! Pomodoro cycle state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Work --(n-th session, n % interval != 0)--> ShortBreak --> Work
//! Work --(n-th session, n % interval == 0)--> LongBreak  --> Work
//! ```
//!
//! A transition only happens when the active countdown reaches zero. The
//! cycle then stops in the completed state until `toggle()` loads and starts
//! the next phase in a single step.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::Phase;
use crate::driver::Tickable;
use crate::events::Event;
use crate::notify::{Notification, NotificationSink};
use crate::storage::PomodoroConfig;
use crate::timer::{Countdown, TICK_PERIOD};

/// Primary control label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PomodoroAction {
    Start,
    Pause,
    StartBreak,
    StartFocus,
}

#[derive(Debug, Clone)]
pub struct PomodoroCycle {
    config: PomodoroConfig,
    phase: Phase,
    countdown: Countdown,
    completed_sessions: u32,
    notifier: Arc<dyn NotificationSink>,
}

impl PomodoroCycle {
    /// Create a stopped cycle at the start of a work phase.
    pub fn new(config: PomodoroConfig, notifier: Arc<dyn NotificationSink>) -> Self {
        let countdown = Countdown::new(Phase::Work.duration_secs(&config));
        Self {
            config,
            phase: Phase::Work,
            countdown,
            completed_sessions: 0,
            notifier,
        }
    }

    /// Same as [`PomodoroCycle::new`] but resuming a session count.
    pub fn with_completed_sessions(mut self, completed_sessions: u32) -> Self {
        self.completed_sessions = completed_sessions;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &PomodoroConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
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

    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    pub fn progress(&self) -> f64 {
        self.countdown.progress()
    }

    /// Progress rounded to a whole percentage.
    pub fn progress_pct(&self) -> u8 {
        (self.progress() * 100.0).round().clamp(0.0, 100.0) as u8
    }

    fn interval(&self) -> u32 {
        self.config.long_break_interval.max(1)
    }

    /// The phase `toggle()` will load once the current one completes.
    pub fn upcoming_phase(&self) -> Phase {
        match self.phase {
            Phase::Work => {
                // Once the work countdown has completed the counter already
                // includes it.
                let finished = if self.is_completed() {
                    self.completed_sessions
                } else {
                    self.completed_sessions.saturating_add(1)
                };
                if finished % self.interval() == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        }
    }

    /// 1-based number of the session being worked on or just finished.
    pub fn session_number(&self) -> u32 {
        match self.phase {
            Phase::Work => self.completed_sessions.saturating_add(1),
            Phase::ShortBreak | Phase::LongBreak => self.completed_sessions,
        }
    }

    /// Work sessions left before the next long break, counting the current one.
    pub fn sessions_until_long_break(&self) -> u32 {
        self.interval() - (self.completed_sessions % self.interval())
    }

    pub fn primary_action(&self) -> PomodoroAction {
        if self.is_completed() {
            match self.phase {
                Phase::Work => PomodoroAction::StartBreak,
                Phase::ShortBreak | Phase::LongBreak => PomodoroAction::StartFocus,
            }
        } else if self.is_running() {
            PomodoroAction::Pause
        } else {
            PomodoroAction::Start
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume. A completed phase advances to the next one and starts it.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_completed() {
            return self.advance();
        }
        if self.is_running() {
            return None;
        }
        let fresh = self.countdown.remaining_secs() == self.countdown.total_secs();
        self.countdown.set_running(true);
        if !self.is_running() {
            return None;
        }
        tracing::debug!(phase = ?self.phase, "pomodoro running");
        if fresh {
            Some(Event::PhaseStarted {
                phase: self.phase,
                duration_secs: self.countdown.total_secs(),
                at: Utc::now(),
            })
        } else {
            Some(Event::PhaseResumed {
                phase: self.phase,
                remaining_secs: self.remaining_secs(),
                at: Utc::now(),
            })
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.countdown.set_running(false);
        tracing::debug!(phase = ?self.phase, "pomodoro paused");
        Some(Event::PhasePaused {
            phase: self.phase,
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// The single start/pause/advance button.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Back to a stopped work phase at full length. The session count is kept.
    /// Returns `None` when the cycle is already there.
    pub fn reset(&mut self) -> Option<Event> {
        let fresh = Countdown::new(Phase::Work.duration_secs(&self.config));
        if self.phase == Phase::Work && self.countdown == fresh {
            return None;
        }
        self.phase = Phase::Work;
        self.countdown = fresh;
        Some(Event::CycleReset {
            completed_sessions: self.completed_sessions,
            at: Utc::now(),
        })
    }

    /// Clear the completed-session counter.
    pub fn reset_sessions(&mut self) -> Option<Event> {
        let cleared = std::mem::take(&mut self.completed_sessions) > 0;
        self.reset().or_else(|| {
            cleared.then(|| Event::CycleReset {
                completed_sessions: 0,
                at: Utc::now(),
            })
        })
    }

    /// Advance one second. Returns `Some(Event::PhaseCompleted)` when the phase runs out.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.countdown.tick() {
            return None;
        }
        let finished = self.phase;
        if finished == Phase::Work {
            self.completed_sessions = self.completed_sessions.saturating_add(1);
        }
        tracing::info!(
            phase = ?finished,
            completed_sessions = self.completed_sessions,
            "pomodoro phase completed"
        );
        self.notifier.notify(&Notification::new(
            "Pomodoro Complete!",
            finished.completion_message(),
        ));
        Some(Event::PhaseCompleted {
            phase: finished,
            next: self.upcoming_phase(),
            completed_sessions: self.completed_sessions,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self) -> Option<Event> {
        let next = self.upcoming_phase();
        self.phase = next;
        self.countdown.reload(next.duration_secs(&self.config));
        self.countdown.set_running(true);
        if !self.is_running() {
            return None;
        }
        tracing::debug!(phase = ?next, "pomodoro advanced");
        Some(Event::PhaseStarted {
            phase: next,
            duration_secs: self.countdown.total_secs(),
            at: Utc::now(),
        })
    }
}

impl Tickable for PomodoroCycle {
    fn period(&self) -> Duration {
        TICK_PERIOD
    }

    fn tick(&mut self) -> Option<Event> {
        PomodoroCycle::tick(self)
    }

    fn is_running(&self) -> bool {
        PomodoroCycle::is_running(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NullSink, RecordingSink};

    fn short_config() -> PomodoroConfig {
        PomodoroConfig {
            work_secs: 3,
            short_break_secs: 1,
            long_break_secs: 2,
            long_break_interval: 4,
        }
    }

    fn cycle() -> PomodoroCycle {
        PomodoroCycle::new(short_config(), Arc::new(NullSink))
    }

    fn finish_phase(cycle: &mut PomodoroCycle) -> Option<Event> {
        let mut last = None;
        while cycle.is_running() {
            if let Some(event) = cycle.tick() {
                last = Some(event);
            }
        }
        last
    }

    #[test]
    fn starts_stopped_in_work() {
        let c = PomodoroCycle::new(PomodoroConfig::default(), Arc::new(NullSink));
        assert_eq!(c.phase(), Phase::Work);
        assert_eq!(c.remaining_secs(), 1500);
        assert!(!c.is_running());
        assert_eq!(c.primary_action(), PomodoroAction::Start);
        assert_eq!(c.session_number(), 1);
        assert_eq!(c.sessions_until_long_break(), 4);
    }

    #[test]
    fn first_work_completion_leads_to_short_break() {
        let mut c = cycle();
        c.toggle();
        let event = finish_phase(&mut c).unwrap();
        assert!(matches!(
            event,
            Event::PhaseCompleted {
                phase: Phase::Work,
                next: Phase::ShortBreak,
                completed_sessions: 1,
                ..
            }
        ));
        assert!(c.is_completed());
        assert!(!c.is_running());
        assert_eq!(c.phase(), Phase::Work);
        assert_eq!(c.primary_action(), PomodoroAction::StartBreak);

        assert!(matches!(
            c.toggle(),
            Some(Event::PhaseStarted { phase: Phase::ShortBreak, duration_secs: 1, .. })
        ));
        assert!(c.is_running());
    }

    #[test]
    fn fourth_session_earns_long_break() {
        let mut c = cycle().with_completed_sessions(3);
        assert_eq!(c.upcoming_phase(), Phase::LongBreak);
        c.toggle();
        finish_phase(&mut c);
        assert_eq!(c.completed_sessions(), 4);
        assert_eq!(c.upcoming_phase(), Phase::LongBreak);

        c.toggle();
        assert_eq!(c.phase(), Phase::LongBreak);
        assert_eq!(c.remaining_secs(), 2);
    }

    #[test]
    fn breaks_always_return_to_work() {
        let mut c = cycle();
        let mut phases = Vec::new();
        c.toggle();
        for _ in 0..16 {
            phases.push(c.phase());
            finish_phase(&mut c);
            c.toggle();
        }
        assert_eq!(
            phases,
            vec![
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::LongBreak,
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::LongBreak,
            ]
        );
        assert_eq!(c.completed_sessions(), 8);
    }

    #[test]
    fn break_completion_does_not_count_a_session() {
        let mut c = cycle();
        c.toggle();
        finish_phase(&mut c);
        c.toggle();
        let event = finish_phase(&mut c).unwrap();
        assert!(matches!(
            event,
            Event::PhaseCompleted {
                phase: Phase::ShortBreak,
                next: Phase::Work,
                completed_sessions: 1,
                ..
            }
        ));
        assert_eq!(c.primary_action(), PomodoroAction::StartFocus);
        assert_eq!(c.session_number(), 1);
    }

    #[test]
    fn notifies_with_phase_message() {
        let recorder = RecordingSink::new();
        let mut c = PomodoroCycle::new(short_config(), Arc::new(recorder.clone()));
        c.toggle();
        finish_phase(&mut c);
        c.toggle();
        finish_phase(&mut c);

        let bodies: Vec<_> = recorder.delivered().into_iter().map(|n| n.body).collect();
        assert_eq!(
            bodies,
            vec![
                Phase::Work.completion_message(),
                Phase::ShortBreak.completion_message(),
            ]
        );
    }

    #[test]
    fn toggle_pauses_and_resumes_mid_phase() {
        let mut c = cycle();
        c.toggle();
        c.tick();
        assert!(matches!(c.toggle(), Some(Event::PhasePaused { remaining_secs: 2, .. })));
        assert!(c.pause().is_none());
        assert_eq!(c.primary_action(), PomodoroAction::Start);
        assert!(matches!(c.toggle(), Some(Event::PhaseResumed { remaining_secs: 2, .. })));
    }

    #[test]
    fn reset_returns_to_work_and_keeps_sessions() {
        let mut c = cycle();
        c.toggle();
        finish_phase(&mut c);
        c.toggle();
        c.reset();
        assert_eq!(c.phase(), Phase::Work);
        assert_eq!(c.remaining_secs(), 3);
        assert!(!c.is_running());
        assert!(!c.is_completed());
        // Observed behavior: the daily count survives a reset.
        assert_eq!(c.completed_sessions(), 1);
    }

    #[test]
    fn reset_sessions_clears_the_counter() {
        let mut c = cycle().with_completed_sessions(3);
        c.reset_sessions();
        assert_eq!(c.completed_sessions(), 0);
        assert_eq!(c.upcoming_phase(), Phase::ShortBreak);
    }

    #[test]
    fn reset_on_fresh_cycle_is_noop() {
        let mut c = cycle();
        let before = (c.phase(), *c.countdown(), c.completed_sessions());
        assert!(c.reset().is_none());
        assert_eq!((c.phase(), *c.countdown(), c.completed_sessions()), before);
        assert!(c.reset_sessions().is_none());
    }

    #[test]
    fn reset_sessions_on_fresh_phase_still_reports_cleared_count() {
        let mut c = cycle().with_completed_sessions(2);
        assert!(matches!(
            c.reset_sessions(),
            Some(Event::CycleReset { completed_sessions: 0, .. })
        ));
        assert!(c.reset_sessions().is_none());
    }

    #[test]
    fn zero_length_phases_still_cycle_back_to_work() {
        let config = PomodoroConfig {
            work_secs: 1,
            short_break_secs: 0,
            long_break_secs: 0,
            long_break_interval: 4,
        };
        let mut c = PomodoroCycle::new(config, Arc::new(NullSink));
        let mut phases = Vec::new();
        for _ in 0..10 {
            assert!(c.toggle().is_some());
            assert!(c.is_running());
            phases.push(c.phase());
            assert!(finish_phase(&mut c).is_some());
        }
        assert_eq!(phases[..4], [Phase::Work, Phase::ShortBreak, Phase::Work, Phase::ShortBreak]);
        assert_eq!(c.completed_sessions(), 5);
    }

    #[test]
    fn progress_pct_rounds() {
        let mut c = cycle();
        c.toggle();
        c.tick();
        assert_eq!(c.progress_pct(), 33);
        c.tick();
        assert_eq!(c.progress_pct(), 67);
    }

    #[test]
    fn sessions_until_long_break_counts_down() {
        let c = cycle().with_completed_sessions(5);
        assert_eq!(c.sessions_until_long_break(), 3);
        let c = cycle().with_completed_sessions(8);
        assert_eq!(c.sessions_until_long_break(), 4);
    }
}
