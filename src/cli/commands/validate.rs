//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use fincache_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            let duration = match config.cache.default_duration() {
                Ok(duration) => duration,
                Err(e) => {
                    println!("Configuration error: {}", e);
                    return Err(e.into());
                }
            };

            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Cache dir: {}", config.cache.dir);
            println!("Default duration: {}h", duration.num_hours());
            println!();
            println!("{}", toml::to_string_pretty(&config)?);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
