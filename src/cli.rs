use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

/// Periodic status checks of network services, published to MQTT
#[derive(Parser, Debug)]
#[command(name = "service-check", version, about)]
pub struct Cli {
    /// Verbose diagnostic logging
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Configuration file (JSON, or YAML by extension)
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["service-check"]).unwrap();

        assert!(!cli.debug);
        assert_eq!(cli.config, PathBuf::from("config.json"));
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["service-check", "-d", "-c", "/etc/service-check.yml"]).unwrap();

        assert!(cli.debug);
        assert_eq!(cli.config, PathBuf::from("/etc/service-check.yml"));
    }

    #[test]
    fn test_config_needs_a_value() {
        assert!(Cli::try_parse_from(["service-check", "-c"]).is_err());
    }
}
