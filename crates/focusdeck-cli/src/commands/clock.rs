use chrono::Local;
use std::time::Duration;

use focusdeck_core::clock::date_line;
use focusdeck_core::{Clock, ClockReading, Driver};

use crate::interactive::{self, Control, Output};

fn handle(_driver: &mut Driver<Clock>, command: &str) -> Control {
    match command {
        "q" => Control::Quit,
        _ => Control::Unknown,
    }
}

fn status(clock: &Clock) -> String {
    format!("{}  (q: quit)", clock.reading())
}

/// Show the wall clock until `q`, or print a single reading with `once`.
pub async fn run(once: bool, output: Output) -> Result<(), Box<dyn std::error::Error>> {
    if once {
        let now = Local::now();
        let reading = ClockReading::from_time(&now);
        if output.is_json() {
            println!("{}", serde_json::to_string(&reading)?);
        } else {
            println!("{reading}");
            println!("{}", date_line(&now));
        }
        return Ok(());
    }

    output.line(&date_line(&Local::now()));
    let (driver, events) = Driver::new(Clock::new());
    interactive::drive(
        driver,
        events,
        output,
        Duration::from_millis(10),
        handle,
        status,
    )
    .await
}
