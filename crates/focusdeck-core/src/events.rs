use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pomodoro::Phase;
use crate::stopwatch::Lap;

/// Every state change in a widget produces an Event.
/// The CLI prints them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// Configured duration changed through an adjustment or a preset.
    TimerAdjusted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerCompleted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    StopwatchStarted {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    StopwatchPaused {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    StopwatchReset {
        at: DateTime<Utc>,
    },
    LapRecorded {
        lap: Lap,
        at: DateTime<Utc>,
    },
    /// A fresh phase countdown began running.
    PhaseStarted {
        phase: Phase,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseResumed {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PhasePaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseCompleted {
        phase: Phase,
        next: Phase,
        completed_sessions: u32,
        at: DateTime<Utc>,
    },
    CycleReset {
        completed_sessions: u32,
        at: DateTime<Utc>,
    },
}
