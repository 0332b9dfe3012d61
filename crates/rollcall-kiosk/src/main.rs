//! Rollcall kiosk binary.
//!
//! # Usage
//!
//! ```bash
//! # Rotate a session code every 30 seconds
//! rollcall-kiosk --code CS201-15102023
//!
//! # Static display (no rotation), larger artifact
//! rollcall-kiosk --code CS201-15102023 --period 0 --size 300
//! ```

use clap::Parser;
use rollcall_kiosk::{KioskConfig, SystemEnv, run};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Rollcall attendance kiosk
#[derive(Parser, Debug)]
#[command(name = "rollcall-kiosk")]
#[command(about = "Rotating attendance code display")]
#[command(version)]
struct Args {
    /// Attendance code to display
    #[arg(short, long)]
    code: String,

    /// Artifact size in pixels
    #[arg(short, long, default_value = "200")]
    size: u32,

    /// Rotation period in seconds (0 disables rotation)
    #[arg(short, long, default_value = "30")]
    period: u64,

    /// Stop after this many rotations
    #[arg(long)]
    rotations: Option<u64>,

    /// Path to a roster JSON file
    #[arg(long)]
    roster: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_env("ROLLCALL_LOG").unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    tracing::info!("Rollcall kiosk starting");

    let config = KioskConfig {
        code: args.code,
        size: args.size,
        period_secs: args.period,
        rotations: args.rotations,
        roster_path: args.roster,
    };

    let env = SystemEnv::new();

    tokio::select! {
        result = run(&env, config) => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, ending session");
        },
    }

    Ok(())
}
