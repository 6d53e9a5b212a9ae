use std::time::Duration;

use focusdeck_core::timer::format_centis;
use focusdeck_core::{Driver, LapRank, Stopwatch};

use crate::interactive::{self, Control, Output};

fn lap_table(stopwatch: &Stopwatch) -> Vec<String> {
    stopwatch
        .laps()
        .iter()
        .map(|lap| {
            let marker = match stopwatch.lap_rank(lap) {
                LapRank::Fastest => "  fastest",
                LapRank::Slowest => "  slowest",
                LapRank::Normal => "",
            };
            format!(
                "  Lap {:<3} {}   Total: {}{marker}",
                lap.number,
                format_centis(lap.split_ms),
                format_centis(lap.total_ms)
            )
        })
        .collect()
}

fn status(stopwatch: &Stopwatch) -> String {
    format!(
        "{}  laps: {}  [s: {}  l: lap  r: reset  q: quit]",
        format_centis(stopwatch.elapsed_ms()),
        stopwatch.laps().len(),
        if stopwatch.is_running() { "pause" } else { "start" }
    )
}

/// Mount the stopwatch (s: start/pause, l: lap, t: lap table, r: reset, q: quit).
pub async fn run(output: Output) -> Result<(), Box<dyn std::error::Error>> {
    let (driver, events) = Driver::new(Stopwatch::new());

    let handle = move |driver: &mut Driver<Stopwatch>, command: &str| {
        match command {
            "s" => {
                driver.apply(|s| s.toggle());
            }
            "l" => {
                driver.apply(|s| s.record_lap());
            }
            "t" => {
                for line in driver.view(lap_table) {
                    output.line(&line);
                }
            }
            "r" => {
                driver.apply(|s| s.reset());
            }
            "q" => return Control::Quit,
            _ => return Control::Unknown,
        }
        Control::Continue
    };

    interactive::drive(
        driver,
        events,
        output,
        Duration::from_millis(50),
        handle,
        status,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lap_table_marks_extremes() {
        let mut stopwatch = Stopwatch::new();
        stopwatch.start();
        for ticks in [10, 30, 20] {
            for _ in 0..ticks {
                stopwatch.tick();
            }
            stopwatch.record_lap();
        }
        let table = lap_table(&stopwatch);
        assert_eq!(table.len(), 3);
        assert!(table[0].starts_with("  Lap 3"));
        assert!(table[1].ends_with("slowest"));
        assert!(table[2].ends_with("fastest"));
        assert!(!table[0].contains("est"));
    }
}
