use clap::Parser;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "teller", about = "Teller - savings and checking accounts at the terminal")]
pub struct CliArgs {
    /// Path to config file
    #[arg(short, long, default_value = "teller.toml")]
    pub config: String,

    /// Log level (overrides config file)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Default minimum balance for new savings accounts (overrides config file)
    #[arg(long)]
    pub savings_minimum: Option<Decimal>,

    /// Default overdraft limit for new checking accounts (overrides config file)
    #[arg(long)]
    pub checking_overdraft: Option<Decimal>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub accounts: AccountDefaults,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

/// Parameters the session uses when the user leaves the limit prompt blank.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AccountDefaults {
    #[serde(default)]
    pub savings_minimum_balance: Decimal,

    #[serde(default)]
    pub checking_overdraft_limit: Decimal,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load(cli: &CliArgs) -> Self {
        let mut config = match std::fs::read_to_string(&cli.config) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse config file: {}", e);
                Config::default()
            }),
            Err(_) => Config::default(),
        };

        // CLI overrides
        if let Some(ref level) = cli.log_level {
            config.logging.level = level.clone();
        }
        if let Some(minimum) = cli.savings_minimum {
            config.accounts.savings_minimum_balance = minimum;
        }
        if let Some(overdraft) = cli.checking_overdraft {
            config.accounts.checking_overdraft_limit = overdraft;
        }

        config
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cli(args: &[&str]) -> CliArgs {
        let mut argv = vec!["teller"];
        argv.extend_from_slice(args);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert_eq!(config.accounts.savings_minimum_balance, Decimal::ZERO);
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(r#"
            [logging]
            level = "debug"
            json = true

            [accounts]
            savings_minimum_balance = 50
            checking_overdraft_limit = "100.50"
        "#).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.accounts.savings_minimum_balance, dec!(50));
        assert_eq!(config.accounts.checking_overdraft_limit, dec!(100.50));
    }

    #[test]
    fn test_cli_overrides() {
        let args = cli(&[
            "--config", "/nonexistent/teller.toml",
            "--log-level", "warn",
            "--savings-minimum", "25",
            "--checking-overdraft", "75.5",
        ]);
        let config = Config::load(&args);

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.accounts.savings_minimum_balance, dec!(25));
        assert_eq!(config.accounts.checking_overdraft_limit, dec!(75.5));
    }
}
