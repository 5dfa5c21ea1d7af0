//! tower-inventory
//!
//! Dynamic inventory for the orchestration tool, read from the fleet-management API

use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use color_eyre::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use towerinv_client::TowerClient;
use towerinv_core::{Settings, host_details, inventory_json, list_inventories};

/// Produce an inventory based on the fleet-management API
#[derive(Parser, Debug)]
#[command(name = "tower-inventory", version, about)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["list", "host", "list_inventories"])
))]
struct Args {
    /// List hosts in the inventory
    #[arg(long)]
    list: bool,

    /// List variables for a host in the inventory
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// List available inventories
    #[arg(long)]
    list_inventories: bool,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    debug: bool,
}

/// Selected output mode
#[derive(Debug, PartialEq, Eq)]
enum Mode {
    List,
    Host(String),
    ListInventories,
}

impl Args {
    fn mode(&self) -> Mode {
        if let Some(host) = &self.host {
            Mode::Host(host.clone())
        } else if self.list_inventories {
            Mode::ListInventories
        } else {
            Mode::List
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(args.debug);

    let output = match args.mode() {
        Mode::Host(host) => host_details(&host).to_string(),
        Mode::ListInventories => {
            let Some(settings) = load_settings(false) else {
                return Ok(ExitCode::FAILURE);
            };
            let client = TowerClient::connect(settings.client_config()).await?;
            list_inventories(&client).await?
        }
        Mode::List => {
            let Some(settings) = load_settings(true) else {
                return Ok(ExitCode::FAILURE);
            };
            let client = TowerClient::connect(settings.client_config()).await?;
            inventory_json(&client, &settings, args.pretty).await?
        }
    };

    println!("{output}");
    Ok(ExitCode::SUCCESS)
}

/// Load settings, reporting problems on stderr
fn load_settings(require_inventory: bool) -> Option<Settings> {
    match Settings::load(require_inventory) {
        Ok(settings) => {
            tracing::debug!(
                url = %settings.url,
                auth = %settings.auth_mode,
                inventory = settings.inventory_id.as_deref().unwrap_or("-"),
                "settings loaded"
            );
            Some(settings)
        }
        Err(e) => {
            eprintln!("{e}");
            None
        }
    }
}

/// Log to stderr; stdout carries only the inventory output
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
