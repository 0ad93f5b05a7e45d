//! cbr-gateway
//!
//! ```text
//!   client JSON ──▶ http (axum) ──▶ Dispatcher ──▶ PermissionFilter
//!                                        │
//!                                        ├──▶ ResultCache (hit → respond)
//!                                        │
//!                                        └──▶ EnvelopeCodec ──▶ SOAP endpoint
//! ```

use clap::Parser;
use std::path::PathBuf;

use cbr_gateway::lifecycle::startup;

#[derive(Parser)]
#[command(name = "cbr-gateway")]
#[command(about = "JSON gateway for the DailyInfo SOAP service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used without one.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = startup::resolve_config(args.config.as_deref())?;
    startup::run(config).await?;
    Ok(())
}
