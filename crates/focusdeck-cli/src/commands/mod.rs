pub mod clock;
pub mod config;
pub mod pomodoro;
pub mod stopwatch;
pub mod timer;
