use clap::Subcommand;
use focusdeck_core::{Config, ConfigError};

use crate::interactive::Output;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting
    Get {
        /// Dot-separated key, e.g. "pomodoro.work_secs" or "countdown.presets_min"
        key: String,
    },
    /// Change one setting and save it
    Set {
        key: String,
        /// Booleans and numbers are parsed; lists take JSON, e.g. "[10, 20]"
        value: String,
    },
    /// Print every setting (TOML, or JSON with --json)
    List,
    /// Overwrite the config file with defaults
    Reset,
    /// Print where the config file lives
    Path,
}

pub fn run(action: ConfigAction, output: Output) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            tracing::info!(%key, %value, "setting saved");
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            if output.is_json() {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("defaults written to {}", Config::path()?.display());
        }
        ConfigAction::Path => println!("{}", Config::path()?.display()),
    }
    Ok(())
}
