//! Wall clock display with hundredths of a second.

use chrono::{Datelike, Local, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::driver::Tickable;
use crate::events::Event;

/// Wall-clock time between two clock samples.
pub const TICK_PERIOD: Duration = Duration::from_millis(10);

/// One sampled wall-clock reading, split into display fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockReading {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub hundredths: u32,
}

impl ClockReading {
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        // chrono represents a leap second as nanosecond >= 1_000_000_000.
        let hundredths = (time.nanosecond() / 10_000_000).min(99);
        Self {
            hours: time.hour(),
            minutes: time.minute(),
            seconds: time.second(),
            hundredths,
        }
    }

    pub fn now() -> Self {
        Self::from_time(&Local::now())
    }

    /// `HH:MM:SS` without the fractional part.
    pub fn hms(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl fmt::Display for ClockReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.hms(), self.hundredths)
    }
}

/// Long date line, e.g. `Saturday, October 17, 2026`.
pub fn date_line<D: Datelike>(date: &D) -> String {
    let weekday = match date.weekday() {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    };
    const MONTHS: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ];
    let month = MONTHS[date.month0() as usize];
    format!("{weekday}, {month} {}, {}", date.day(), date.year())
}

/// Clock widget. Always running; each tick resamples local time.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    reading: ClockReading,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self {
            reading: ClockReading::now(),
        }
    }

    pub fn reading(&self) -> ClockReading {
        self.reading
    }

    pub fn sample(&mut self) {
        self.reading = ClockReading::now();
    }
}

impl Tickable for Clock {
    fn period(&self) -> Duration {
        TICK_PERIOD
    }

    fn tick(&mut self) -> Option<Event> {
        self.sample();
        None
    }

    fn is_running(&self) -> bool {
        true
    }
}
