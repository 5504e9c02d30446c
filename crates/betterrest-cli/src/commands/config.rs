//! Preference commands over `config.toml`.

use clap::Subcommand;

use betterrest_core::{Config, ConfigError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value by dot-path key (e.g. "defaults.wake_time")
    Get { key: String },
    /// Change one value and save the file
    Set { key: String, value: String },
    /// Print the whole configuration as JSON
    List,
    /// Overwrite the file with built-in defaults
    Reset,
    /// Print where the file lives
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
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
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => {
            println!("{}", serde_json::to_string_pretty(&Config::load()?)?);
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("defaults restored in {}", Config::path()?.display());
        }
        ConfigAction::Path => println!("{}", Config::path()?.display()),
    }
    Ok(())
}
