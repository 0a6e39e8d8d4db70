use anyhow::{Result, anyhow};
use clap::Parser;
use kafka_notify::KafkaSettings;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Message payload to publish
    #[arg(long)]
    pub message: String,

    /// Correlation tag, appended to kafka_key as `<kafka_key>-<logsign>`
    #[arg(long, default_value = "sender")]
    pub logsign: String,

    /// Load settings from this env file instead of ./.env
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn load(cli: &Cli) -> Result<KafkaSettings> {
    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .map_err(|e| anyhow!("cannot load env file {}: {e}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    Ok(KafkaSettings::from_env())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["sender", "--message", "hello"]).unwrap();
        assert_eq!(cli.message, "hello");
        assert_eq!(cli.logsign, "sender");
        assert!(cli.env_file.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_requires_message() {
        assert!(Cli::try_parse_from(["sender"]).is_err());
    }

    #[test]
    fn test_missing_env_file_is_error() {
        let cli = Cli::try_parse_from([
            "sender",
            "--message",
            "m",
            "--env-file",
            "/nonexistent/kafka.env",
        ])
        .unwrap();
        let err = load(&cli).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/kafka.env"));
    }
}
