use clap::Subcommand;
use serde::Serialize;
use std::time::Duration;

use focusdeck_core::pomodoro::PomodoroAction as Button;
use focusdeck_core::timer::format_mm_ss;
use focusdeck_core::{Config, Driver, NullSink, Phase, PomodoroCycle};

use crate::interactive::{self, Control, Output};

#[derive(Subcommand)]
pub enum PomodoroAction {
    /// Mount the pomodoro cycle (s: start/pause/next phase, r: reset, z: reset sessions, q: quit)
    Run,
    /// Print the phase sequence for a number of work sessions
    Plan {
        /// Number of work sessions to plan (at most 1000)
        #[arg(long, default_value = "4", value_parser = clap::value_parser!(u32).range(0..=1000))]
        sessions: u32,
    },
}

#[derive(Debug, Serialize)]
struct PlannedPhase {
    phase: Phase,
    duration_secs: u64,
}

/// Walk a silent cycle through `sessions` work phases and the break after each.
fn plan(config: &Config, sessions: u32) -> Vec<PlannedPhase> {
    let mut cycle = PomodoroCycle::new(config.pomodoro.clone(), std::sync::Arc::new(NullSink));
    let mut phases = Vec::new();

    cycle.toggle();
    for _ in 0..sessions {
        // A work phase, then the break that follows it.
        for _ in 0..2 {
            phases.push(PlannedPhase {
                phase: cycle.phase(),
                duration_secs: cycle.countdown().total_secs(),
            });
            while cycle.is_running() {
                cycle.tick();
            }
            cycle.toggle();
        }
    }
    phases
}

fn handle(driver: &mut Driver<PomodoroCycle>, command: &str) -> Control {
    match command {
        "s" => {
            driver.apply(|c| c.toggle());
        }
        "r" => {
            driver.apply(|c| c.reset());
        }
        "z" => {
            driver.apply(|c| c.reset_sessions());
        }
        "q" => return Control::Quit,
        _ => return Control::Unknown,
    }
    Control::Continue
}

fn status(cycle: &PomodoroCycle) -> String {
    let button = match cycle.primary_action() {
        Button::Start => "start",
        Button::Pause => "pause",
        Button::StartBreak => "start break",
        Button::StartFocus => "start focus",
    };
    let mut line = format!(
        "{}  Session {}  {}  {:>3}%",
        cycle.phase(),
        cycle.session_number(),
        format_mm_ss(cycle.remaining_secs()),
        cycle.progress_pct(),
    );
    if cycle.phase() == Phase::Work {
        line.push_str(&format!(
            "  Next long break in {} sessions",
            cycle.sessions_until_long_break()
        ));
    }
    line.push_str(&format!("  [s: {button}]"));
    line
}

pub async fn run(action: PomodoroAction, output: Output) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        PomodoroAction::Run => {
            let cycle = PomodoroCycle::new(config.pomodoro.clone(), interactive::notifier(&config));
            let (driver, events) = Driver::new(cycle);
            interactive::drive(
                driver,
                events,
                output,
                Duration::from_millis(200),
                handle,
                status,
            )
            .await?;
        }
        PomodoroAction::Plan { sessions } => {
            let phases = plan(&config, sessions);
            if output.is_json() {
                println!("{}", serde_json::to_string_pretty(&phases)?);
            } else {
                for (i, planned) in phases.iter().enumerate() {
                    println!(
                        "{:>2}. {:<12} {}",
                        i + 1,
                        planned.phase.to_string(),
                        format_mm_ss(planned.duration_secs)
                    );
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_ends_with_break_after_last_session() {
        let phases: Vec<Phase> = plan(&Config::default(), 4).into_iter().map(|p| p.phase).collect();
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
            ]
        );
    }

    #[test]
    fn empty_plan() {
        assert!(plan(&Config::default(), 0).is_empty());
    }

    #[test]
    fn status_mentions_next_long_break_during_work() {
        let cycle = PomodoroCycle::new(Config::default().pomodoro, std::sync::Arc::new(NullSink));
        assert_eq!(
            status(&cycle),
            "Focus Time  Session 1  25:00    0%  Next long break in 4 sessions  [s: start]"
        );
    }
}
