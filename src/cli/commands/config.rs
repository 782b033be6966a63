use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let yaml = serde_yaml::to_string(cfg).map_err(|_| AppError::ConfigLoad)?;
            info(format!("Configuration file: {:?}", Config::config_file()));
            println!("{}", yaml);
        }

        if *check {
            if cfg.database.is_empty() {
                warning("Missing 'database' entry in configuration");
            } else {
                success("Configuration looks complete");
            }
        }
    }
    Ok(())
}
