//! Count-up stopwatch with laps.
//!
//! Elapsed time is kept in milliseconds and grows by one tick quantum
//! (10 ms) per tick while running. Laps are stored most-recent-first.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::driver::Tickable;
use crate::events::Event;

/// Wall-clock time between two stopwatch ticks, and the amount each tick adds.
pub const TICK_PERIOD: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lap {
    /// 1-based, in recording order.
    pub number: u32,
    /// Elapsed time when the lap was recorded.
    pub total_ms: u64,
    /// Time since the previous lap (or since zero for the first).
    pub split_ms: u64,
}

/// Highlight class of a lap within the current list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LapRank {
    Fastest,
    Slowest,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stopwatch {
    elapsed_ms: u64,
    running: bool,
    laps: Vec<Lap>,
    last_lap_ms: u64,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            elapsed_ms: 0,
            running: false,
            laps: Vec::new(),
            last_lap_ms: 0,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Recorded laps, most recent first.
    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn can_lap(&self) -> bool {
        self.elapsed_ms > 0
    }

    pub fn can_reset(&self) -> bool {
        self.elapsed_ms > 0 || !self.laps.is_empty()
    }

    pub fn fastest_split_ms(&self) -> Option<u64> {
        self.laps.iter().map(|l| l.split_ms).min()
    }

    pub fn slowest_split_ms(&self) -> Option<u64> {
        self.laps.iter().map(|l| l.split_ms).max()
    }

    /// Fastest and slowest are only highlighted once two laps exist.
    /// A split equal to both extremes counts as fastest.
    pub fn lap_rank(&self, lap: &Lap) -> LapRank {
        if self.laps.len() < 2 {
            return LapRank::Normal;
        }
        if Some(lap.split_ms) == self.fastest_split_ms() {
            LapRank::Fastest
        } else if Some(lap.split_ms) == self.slowest_split_ms() {
            LapRank::Slowest
        } else {
            LapRank::Normal
        }
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        tracing::debug!(elapsed_ms = self.elapsed_ms, "stopwatch started");
        Some(Event::StopwatchStarted {
            elapsed_ms: self.elapsed_ms,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        tracing::debug!(elapsed_ms = self.elapsed_ms, "stopwatch paused");
        Some(Event::StopwatchPaused {
            elapsed_ms: self.elapsed_ms,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Clear time and laps. Returns `None` when there is nothing to clear.
    pub fn reset(&mut self) -> Option<Event> {
        if *self == Self::new() {
            return None;
        }
        *self = Self::new();
        Some(Event::StopwatchReset { at: Utc::now() })
    }

    /// Record a lap at the current elapsed time. Ignored at zero.
    pub fn record_lap(&mut self) -> Option<Event> {
        if !self.can_lap() {
            return None;
        }
        let lap = Lap {
            number: u32::try_from(self.laps.len() + 1).unwrap_or(u32::MAX),
            total_ms: self.elapsed_ms,
            split_ms: self.elapsed_ms - self.last_lap_ms,
        };
        self.laps.insert(0, lap);
        self.last_lap_ms = self.elapsed_ms;
        tracing::debug!(number = lap.number, split_ms = lap.split_ms, "lap recorded");
        Some(Event::LapRecorded {
            lap,
            at: Utc::now(),
        })
    }

    pub fn tick(&mut self) -> Option<Event> {
        if self.running {
            self.elapsed_ms = self.elapsed_ms.saturating_add(TICK_PERIOD.as_millis() as u64);
        }
        None
    }
}

impl Tickable for Stopwatch {
    fn period(&self) -> Duration {
        TICK_PERIOD
    }

    fn tick(&mut self) -> Option<Event> {
        Stopwatch::tick(self)
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
