use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod interactive;

use interactive::Output;

#[derive(Parser)]
#[command(name = "focusdeck", version, about = "Focusdeck CLI")]
struct Cli {
    /// Print events as JSON lines instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wall clock with hundredths
    Clock {
        /// Print one reading and exit
        #[arg(long)]
        once: bool,
    },
    /// Countdown timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Stopwatch with laps (s: start/pause, l: lap, t: lap table, r: reset, q: quit)
    Stopwatch,
    /// Pomodoro cycle
    Pomodoro {
        #[command(subcommand)]
        action: commands::pomodoro::PomodoroAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

/// Logs go to stderr so stdout only carries widget output.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("FOCUSDECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let output = Output::new(cli.json);

    let result = match cli.command {
        Commands::Clock { once } => commands::clock::run(once, output).await,
        Commands::Timer { action } => commands::timer::run(action, output).await,
        Commands::Stopwatch => commands::stopwatch::run(output).await,
        Commands::Pomodoro { action } => commands::pomodoro::run(action, output).await,
        Commands::Config { action } => commands::config::run(action, output),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "focusdeck", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
