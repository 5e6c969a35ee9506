use colored::*;

use crate::cli::args::{ConfigArgs, ConfigCommand};
use crate::config::{mask, Config, KEYS};
use crate::error::Result;

const SECRET_KEY: &str = "auth.rest_api_key";

/// Execute config command
pub fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("✅ Configuration updated: {} = {}", key, display(&key, value.trim()));
            Ok(())
        }
        ConfigCommand::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{}: {}", key, display(&key, &value)),
                None => println!("Configuration key '{}' not set", key),
            }
            Ok(())
        }
        ConfigCommand::List => {
            let config = Config::load()?;
            for key in KEYS {
                let value = config
                    .get(key)
                    .map(|v| display(key, &v))
                    .unwrap_or_else(|| "-".dimmed().to_string());
                println!("{}: {}", key.cyan(), value);
            }
            Ok(())
        }
        ConfigCommand::Path => {
            let path = Config::config_file_path()?;
            println!("Configuration file: {}", path.display());
            Ok(())
        }
    }
}

fn display(key: &str, value: &str) -> String {
    if key == SECRET_KEY {
        mask(value)
    } else {
        value.to_string()
    }
}
