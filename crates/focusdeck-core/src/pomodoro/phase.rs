use serde::{Deserialize, Serialize};
use std::fmt;

use crate::storage::PomodoroConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn title(self) -> &'static str {
        match self {
            Phase::Work => "Focus Time",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    /// Body of the notification sent when this phase runs out.
    pub fn completion_message(self) -> &'static str {
        match self {
            Phase::Work => "Work session complete! Time for a break.",
            Phase::ShortBreak => "Break complete! Ready for another work session?",
            Phase::LongBreak => "Long break complete! Ready to get back to work?",
        }
    }

    /// Length of this phase, never shorter than one tick so every phase can
    /// run out and hand over to the next.
    pub fn duration_secs(self, config: &PomodoroConfig) -> u64 {
        let secs = match self {
            Phase::Work => config.work_secs,
            Phase::ShortBreak => config.short_break_secs,
            Phase::LongBreak => config.long_break_secs,
        };
        secs.max(1)
    }

    pub fn is_break(self) -> bool {
        !matches!(self, Phase::Work)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_follow_config() {
        let config = PomodoroConfig::default();
        assert_eq!(Phase::Work.duration_secs(&config), 1500);
        assert_eq!(Phase::ShortBreak.duration_secs(&config), 300);
        assert_eq!(Phase::LongBreak.duration_secs(&config), 900);
    }

    #[test]
    fn zero_durations_become_one_second() {
        let config = PomodoroConfig {
            work_secs: 0,
            short_break_secs: 0,
            long_break_secs: 0,
            long_break_interval: 4,
        };
        assert_eq!(Phase::Work.duration_secs(&config), 1);
        assert_eq!(Phase::ShortBreak.duration_secs(&config), 1);
        assert_eq!(Phase::LongBreak.duration_secs(&config), 1);
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Phase::ShortBreak).unwrap(), "\"short_break\"");
        assert!(Phase::LongBreak.is_break());
        assert!(!Phase::Work.is_break());
    }
}
