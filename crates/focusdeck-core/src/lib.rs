//! # Focusdeck Core Library
//!
//! This library provides the state machines behind the Focusdeck time
//! widgets. Every widget is available through the standalone CLI binary,
//! which is a thin front end over the same core library.
//!
//! ## Architecture
//!
//! - **Widgets**: synchronous state machines that require the caller to
//!   invoke `tick()` at a fixed period
//! - **Driver**: owns a widget plus a cancellable tokio tick task that only
//!   lives while the widget is running
//! - **Notifications**: completion alerts go through an injected sink
//! - **Storage**: TOML-based configuration of widget defaults
//!
//! ## Key Components
//!
//! - [`CountdownTimer`]: countdown with presets and adjustment
//! - [`Stopwatch`]: count-up timer with laps
//! - [`PomodoroCycle`]: work/break phase machine
//! - [`Clock`]: wall clock with hundredths
//! - [`Driver`]: tick scheduling
//! - [`Config`]: application configuration management

pub mod clock;
pub mod driver;
pub mod error;
pub mod events;
pub mod notify;
pub mod pomodoro;
pub mod stopwatch;
pub mod storage;
pub mod timer;

pub use clock::{Clock, ClockReading};
pub use driver::{Driver, RepeatingTask, Tickable};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use notify::{Notification, NotificationSink, NullSink, Permission, PermissionGated};
pub use pomodoro::{Phase, PomodoroCycle};
pub use stopwatch::{Lap, LapRank, Stopwatch};
pub use storage::Config;
pub use timer::{CountdownTimer, TimerState};
