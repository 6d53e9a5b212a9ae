use clap::Subcommand;
use std::time::Duration;

use focusdeck_core::timer::{format_mm_ss, TimerAction as Button};
use focusdeck_core::{Config, CountdownTimer, Driver};

use crate::interactive::{self, Control, Output};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Mount the countdown timer (s: start/pause, r: reset, +/-: adjust, p N: preset, q: quit)
    Run {
        /// Initial duration in minutes (defaults to the configured duration)
        #[arg(long)]
        minutes: Option<u64>,
    },
    /// List the configured presets
    Presets,
}

fn handle(driver: &mut Driver<CountdownTimer>, command: &str) -> Control {
    let mut words = command.split_whitespace();
    match (words.next(), words.next()) {
        (Some("s"), None) => {
            driver.apply(|t| t.toggle());
        }
        (Some("r"), None) => {
            driver.apply(|t| t.reset());
        }
        (Some("+"), None) => {
            driver.apply(|t| t.increase());
        }
        (Some("-"), None) => {
            driver.apply(|t| t.decrease());
        }
        (Some("p"), Some(minutes)) => match minutes.parse::<u64>() {
            Ok(minutes) => {
                driver.apply(|t| t.apply_preset(minutes));
            }
            Err(_) => return Control::Unknown,
        },
        (Some("q"), None) => return Control::Quit,
        _ => return Control::Unknown,
    }
    Control::Continue
}

fn status(timer: &CountdownTimer) -> String {
    let button = match timer.primary_action() {
        Button::Start => "s: start",
        Button::Pause => "s: pause",
        Button::Reset => "s: reset",
    };
    format!(
        "{}  {:>3.0}%  {} min  [{button}]",
        format_mm_ss(timer.remaining_secs()),
        timer.progress() * 100.0,
        timer.configured_secs() / 60,
    )
}

pub async fn run(action: TimerAction, output: Output) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        TimerAction::Run { minutes } => {
            let mut timer = CountdownTimer::new(
                config.countdown.clone(),
                interactive::notifier(&config),
            );
            if let Some(minutes) = minutes {
                timer.apply_preset(minutes);
            }
            let (driver, events) = Driver::new(timer);
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
        TimerAction::Presets => {
            if output.is_json() {
                println!("{}", serde_json::to_string(&config.countdown.presets_min)?);
            } else {
                for minutes in &config.countdown.presets_min {
                    println!("{minutes} min");
                }
            }
        }
    }
    Ok(())
}
