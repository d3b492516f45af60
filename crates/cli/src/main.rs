//! fi-dash
//!
//! Terminal front end for the FI dashboard:
//! - Show the dashboard, history and coach panels
//! - Update bucket balances and monthly savings
//! - Switch display currency, refresh exchange rates
//! - Export/import JSON and encrypted backups

mod config;
mod render;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use fi_dashboard_core::models::currency::Currency;
use fi_dashboard_core::models::history::HistorySnapshot;
use fi_dashboard_core::providers::fixed::FixedRateProvider;
use fi_dashboard_core::providers::frankfurter::FrankfurterProvider;
use fi_dashboard_core::services::portfolio_service::EditField;
use fi_dashboard_core::storage::store::FileStore;
use fi_dashboard_core::FiDashboard;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;

#[derive(Parser)]
#[command(name = "fi-dash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal financial-independence dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: <config dir>/fi-dash/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show amounts in this currency without changing the saved preference
    #[arg(short, long, global = true)]
    pub currency: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the dashboard (default)
    Show,

    /// Update balances; omitted fields keep their current value
    Edit {
        #[arg(long)]
        core: Option<String>,
        #[arg(long)]
        growth: Option<String>,
        #[arg(long)]
        crypto: Option<String>,
        #[arg(long)]
        hedge: Option<String>,
        /// Monthly savings
        #[arg(long)]
        savings: Option<String>,
    },

    /// Set the saved display currency
    Currency {
        /// ISO code, e.g. USD
        code: String,
    },

    /// Historical performance table
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Coach messages for the current state
    Advice,

    /// Show exchange rates, optionally refreshing them
    Rates {
        /// Fetch the latest ECB rates
        #[arg(long)]
        refresh: bool,
        /// Restore the built-in fixed rates
        #[arg(long, conflicts_with = "refresh")]
        reset: bool,
    },

    /// Write the portfolio as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Replace the portfolio with a JSON export
    Import { path: PathBuf },

    /// Write a password-protected backup (password from FIDASH_PASSWORD)
    Backup { path: PathBuf },

    /// Restore a password-protected backup (password from FIDASH_PASSWORD)
    Restore { path: PathBuf },

    /// Discard all data and start from defaults
    Reset {
        /// Required to actually reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Add or replace a year-end snapshot (SGD)
    Add {
        year: i32,
        net_worth: f64,
        total_saved: f64,
    },
    /// Remove the snapshot for a year
    Remove { year: i32 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.config.as_deref())?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(data_dir = %config.storage.data_dir, "starting fi-dash");

    let store = FileStore::open(&config.storage.data_dir)
        .with_context(|| format!("opening data directory {}", config.storage.data_dir))?;
    let mut dashboard = FiDashboard::open(store, config.targets.clone())?;

    for (code, rate) in &config.rates {
        let currency: Currency = code.parse()?;
        let rates = dashboard.rates();
        if !rates.is_overridden(currency) || rates.rate(currency).ok() != Some(*rate) {
            dashboard
                .set_rate(currency, *rate)
                .with_context(|| format!("applying configured rate for {code}"))?;
        }
    }

    let display = match cli.currency.as_deref().or(config.display.currency.as_deref()) {
        Some(code) => code.parse::<Currency>()?,
        None => dashboard.data().currency,
    };
    let today = Utc::now().date_naive();

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => {
            let view = dashboard.view_as(display, today)?;
            print!("{}", output(cli.json, &view, render::dashboard)?);
        }

        Commands::Edit {
            core,
            growth,
            crypto,
            hedge,
            savings,
        } => {
            let fields = [
                ("core", core),
                ("growth", growth),
                ("crypto", crypto),
                ("hedge", hedge),
                ("savings", savings),
            ];
            if fields.iter().all(|(_, v)| v.is_none()) {
                bail!("nothing to update: pass at least one of --core, --growth, --crypto, --hedge, --savings");
            }
            dashboard.open_edit();
            for (name, value) in fields {
                if let Some(text) = value {
                    dashboard.edit_field(name.parse::<EditField>()?, text)?;
                }
            }
            dashboard.save_edit().context("saving portfolio update")?;
            let view = dashboard.view_as(display, today)?;
            print!("{}", output(cli.json, &view, render::dashboard)?);
        }

        Commands::Currency { code } => {
            let currency: Currency = code.parse()?;
            dashboard.set_currency(currency)?;
            println!("Display currency set to {} ({})", currency, currency.name());
        }

        Commands::History { action } => {
            match action {
                Some(HistoryAction::Add {
                    year,
                    net_worth,
                    total_saved,
                }) => dashboard.add_snapshot(HistorySnapshot::new(year, net_worth, total_saved))?,
                Some(HistoryAction::Remove { year }) => {
                    dashboard.remove_snapshot(year)?;
                }
                None => {}
            }
            let view = dashboard.performance_as(display)?;
            print!("{}", output(cli.json, &view, render::performance)?);
        }

        Commands::Advice => {
            let items = dashboard.advice_as(display, today)?;
            print!("{}", output(cli.json, &items, |items| render::advice(items))?);
        }

        Commands::Rates { refresh, reset } => {
            if refresh {
                dashboard
                    .refresh_rates(&FrankfurterProvider::new())
                    .await
                    .context("refreshing exchange rates")?;
            } else if reset {
                dashboard.refresh_rates(&FixedRateProvider::default()).await?;
            }
            print!("{}", output(cli.json, dashboard.rates(), render::rates)?);
        }

        Commands::Export { out } => {
            let json = dashboard.export_json()?;
            match out {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{json}"),
            }
        }

        Commands::Import { path } => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            dashboard.import_json(&json)?;
            println!("Imported portfolio from {}", path.display());
        }

        Commands::Backup { path } => {
            let password = backup_password()?;
            let bytes = dashboard.export_backup(&password)?;
            std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
            println!("Backup written to {}", path.display());
        }

        Commands::Restore { path } => {
            let password = backup_password()?;
            let bytes = std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            dashboard.import_backup(&bytes, &password)?;
            println!("Restored portfolio from {}", path.display());
        }

        Commands::Reset { yes } => {
            if !yes {
                bail!("refusing to reset without --yes");
            }
            dashboard.reset()?;
            println!("Portfolio reset to defaults");
        }
    }

    Ok(())
}

/// Pretty JSON when `--json` is set, the text panel otherwise.
fn output<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(value)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(text(value))
    }
}

fn backup_password() -> Result<String> {
    let password = std::env::var("FIDASH_PASSWORD").context("set FIDASH_PASSWORD to the backup password")?;
    if password.is_empty() {
        bail!("FIDASH_PASSWORD is empty");
    }
    Ok(password)
}
