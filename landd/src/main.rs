mod config;

use std::{env, process, str::FromStr};

use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use config::{AppConfig, ConfigError, Environment};
use land_ledger::{LandLedger, StorageError};
use registry_types::Timestamp;

fn main() {
    if let Err(err) = run() {
        eprintln!("landd failed: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    env_logger::init();

    let config = {
        let env = parse_environment()?;
        AppConfig::load(env)?
    };

    let ledger = LandLedger::bootstrap(config.ledger.clone())?;

    println!(
        "landd booted in {} mode; ledger state at {:?}",
        config.env_label(),
        config.ledger.state_dir()
    );
    log_ledger_summary(&ledger);

    Ok(())
}

fn log_ledger_summary(ledger: &LandLedger) {
    let stats = ledger.get_land_statistics();
    println!(
        "Registry: {} parcels across {} owners ({} total plan area); next id {}",
        stats.total_lands,
        stats.total_owners,
        ledger.total_land_area(),
        ledger.get_next_land_id()
    );
    match stats.average_price {
        Some(average) => println!(
            "Marketplace: {} active listings, average asking price {average}",
            stats.lands_for_sale
        ),
        None => println!("Marketplace: no active listings"),
    }
    match ledger.get_recent_transactions(1).first() {
        Some(last) => println!(
            "Ledger: {} transactions, most recent at {}",
            stats.total_transactions,
            format_timestamp(last.timestamp)
        ),
        None => println!("Ledger: no transactions recorded"),
    }
}

fn format_timestamp(ts: Timestamp) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(ts as i128)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| format!("{ts}"))
}

fn parse_environment() -> Result<Environment, AppError> {
    let arg = env::args().nth(1).ok_or(AppError::Usage)?;
    Environment::from_str(&arg).map_err(AppError::from)
}

#[derive(Debug, Error)]
enum AppError {
    #[error("usage: landd <dev|prod>")]
    Usage,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
