mod countdown;
mod format;

pub use countdown::{
    Countdown, CountdownTimer, TimerAction, TimerState, MIN_DURATION_SECS, TICK_PERIOD,
};
pub use format::{format_centis, format_mm_ss, parse_mm_ss};
