//! Fibre Channel attach/detach demonstration tool
//!
//! Thin command-line wrapper over the `csi_fc` library: resolves a volume
//! from WWN+LUN or WWID identifiers and prints the device path, or tears a
//! device path down. All decision logic lives in the library.

use std::fs;

use clap::{Parser, Subcommand};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use csi_fc::{Connector, OsFs};

/// CLI arguments for the FC volume tool
#[derive(Parser, Debug)]
#[command(name = "csi-fc")]
#[command(about = "Fibre Channel volume attach/detach tool")]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "CSI_FC_LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a volume to a device path
    Attach {
        /// Target WWN, repeatable; selects WWN+LUN resolution
        #[arg(long = "wwn")]
        wwns: Vec<String>,

        /// LUN paired with every WWN
        #[arg(long, default_value = "0")]
        lun: String,

        /// WWID, repeatable; used only when no WWN is given
        #[arg(long = "wwid")]
        wwids: Vec<String>,

        /// Volume label for logging
        #[arg(long, default_value = "")]
        volume_name: String,

        /// Load the connector from a JSON document instead of flags
        #[arg(long, conflicts_with_all = ["wwns", "lun", "wwids", "volume_name"])]
        connector: Option<String>,
    },
    /// Remove a device path and all of its multipath slaves
    Detach {
        /// Device path returned by attach (raw or device-mapper)
        device_path: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Attach {
            wwns,
            lun,
            wwids,
            volume_name,
            connector,
        } => {
            let c = match connector {
                Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
                None => Connector {
                    volume_name,
                    target_wwns: wwns,
                    lun,
                    wwids,
                },
            };
            match csi_fc::attach(&c, &OsFs) {
                Ok(device_path) => {
                    info!(device = %device_path, "Attach complete");
                    println!("{}", device_path);
                }
                Err(e) => {
                    error!(error = %e, "Attach failed");
                    return Err(e.into());
                }
            }
        }
        Command::Detach { device_path } => {
            if let Err(e) = csi_fc::detach(&device_path, &OsFs) {
                error!(error = %e, "Detach failed");
                return Err(e.into());
            }
            info!(device = %device_path, "Detach complete");
        }
    }

    Ok(())
}
