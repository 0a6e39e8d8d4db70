use anyhow::Result;
use clap::Parser;
use log::info;

mod config;

fn setup_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = config::Cli::parse();
    let settings = config::load(&cli)?;
    setup_logging();

    info!("sender starting:");
    info!("  enabled={}", settings.enabled);
    info!("  brokers={:?}", settings.brokers);
    info!("  topic={}", settings.topic);
    info!("  sasl={}", settings.sasl.is_some());

    let outcome = kafka_notify::publish(&settings, &cli.message, &cli.logsign).await;

    if cli.json {
        println!("{}", outcome.to_json()?);
    } else {
        println!("{outcome}");
    }

    if outcome.is_failure() {
        std::process::exit(1);
    }
    Ok(())
}
