//! Shared plumbing for the interactive widget commands.
//!
//! A mounted widget reads one command per stdin line, prints every event,
//! and redraws a single status line in text mode. `--json` switches event
//! output to JSON lines and suppresses the status line.

use std::error::Error;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use focusdeck_core::notify::{Notification, NotificationSink, Permission, PermissionGated};
use focusdeck_core::timer::{format_centis, format_mm_ss};
use focusdeck_core::{Config, Driver, Event, Tickable};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// What a command handler wants the loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
    Unknown,
}

#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn event(&self, event: &Event) {
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!("failed to encode event: {e}"),
            }
        } else {
            self.line(&describe(event));
        }
    }

    /// A full line of text output. Clears any status line first.
    pub fn line(&self, text: &str) {
        if self.json {
            return;
        }
        println!("\r\x1b[2K{text}");
    }

    /// Redraw the status line in place.
    pub fn status(&self, text: &str) {
        if self.json {
            return;
        }
        print!("\r\x1b[2K{text}");
        let _ = std::io::stdout().flush();
    }

    pub fn note(&self, text: &str) {
        eprintln!("{text}");
    }

    fn finish(&self) {
        if !self.json {
            println!();
        }
    }
}

fn describe(event: &Event) -> String {
    match event {
        Event::TimerStarted { remaining_secs, .. } => {
            format!("timer started, {} left", format_mm_ss(*remaining_secs))
        }
        Event::TimerPaused { remaining_secs, .. } => {
            format!("timer paused at {}", format_mm_ss(*remaining_secs))
        }
        Event::TimerReset { duration_secs, .. } => {
            format!("timer reset to {}", format_mm_ss(*duration_secs))
        }
        Event::TimerAdjusted { duration_secs, .. } => {
            format!("timer set to {} minutes", duration_secs / 60)
        }
        Event::TimerCompleted { duration_secs, .. } => {
            format!("timer complete ({})", format_mm_ss(*duration_secs))
        }
        Event::StopwatchStarted { elapsed_ms, .. } => {
            format!("stopwatch started at {}", format_centis(*elapsed_ms))
        }
        Event::StopwatchPaused { elapsed_ms, .. } => {
            format!("stopwatch paused at {}", format_centis(*elapsed_ms))
        }
        Event::StopwatchReset { .. } => "stopwatch reset".to_string(),
        Event::LapRecorded { lap, .. } => format!(
            "Lap {:<3} {}   Total: {}",
            lap.number,
            format_centis(lap.split_ms),
            format_centis(lap.total_ms)
        ),
        Event::PhaseStarted {
            phase,
            duration_secs,
            ..
        } => format!("{phase} started ({})", format_mm_ss(*duration_secs)),
        Event::PhaseResumed {
            phase,
            remaining_secs,
            ..
        } => format!("{phase} resumed, {} left", format_mm_ss(*remaining_secs)),
        Event::PhasePaused {
            phase,
            remaining_secs,
            ..
        } => format!("{phase} paused at {}", format_mm_ss(*remaining_secs)),
        Event::PhaseCompleted {
            phase,
            next,
            completed_sessions,
            ..
        } => format!(
            "{phase} complete, {completed_sessions} sessions done; press s for {next}"
        ),
        Event::CycleReset {
            completed_sessions, ..
        } => format!("cycle reset ({completed_sessions} sessions kept)"),
    }
}

/// Notifications in a terminal: a bell plus the message on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn notify(&self, notification: &Notification) {
        tracing::info!(title = %notification.title, "notification");
        eprintln!("\x07[{}] {}", notification.title, notification.body);
    }
}

/// The sink every widget gets. Disabling notifications in the config plays
/// the role of a denied permission.
pub fn notifier(config: &Config) -> Arc<dyn NotificationSink> {
    let permission = if config.notifications.enabled {
        Permission::Granted
    } else {
        Permission::Denied
    };
    let gated = PermissionGated::new(TerminalSink, permission);
    tracing::debug!(permission = ?gated.permission(), "notifications configured");
    Arc::new(gated)
}

/// Mount a driven widget until `q`, end of input, or Ctrl-C.
pub async fn drive<W, H, S>(
    mut driver: Driver<W>,
    mut events: mpsc::UnboundedReceiver<Event>,
    output: Output,
    refresh: Duration,
    mut handle: H,
    status: S,
) -> Result<(), Box<dyn Error>>
where
    W: Tickable,
    H: FnMut(&mut Driver<W>, &str) -> Control,
    S: Fn(&W) -> String,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut redraw = tokio::time::interval(refresh);
    redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = line.trim();
                if command.is_empty() {
                    continue;
                }
                match handle(&mut driver, command) {
                    Control::Continue => {}
                    Control::Quit => break,
                    Control::Unknown => output.note(&format!("unknown command: {command}")),
                }
            }
            Some(event) = events.recv() => output.event(&event),
            _ = redraw.tick() => output.status(&driver.view(&status)),
            _ = &mut ctrl_c => break,
        }
    }

    // Events from the last commands may still be queued.
    while let Ok(event) = events.try_recv() {
        output.event(&event);
    }
    output.finish();
    tracing::debug!("widget unmounted");
    Ok(())
}
