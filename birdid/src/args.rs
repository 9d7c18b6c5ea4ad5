use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Bird identification relay
#[derive(Debug, Parser)]
#[command(name = "birdid", about = "Identify East African birds from audio clips and photos")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "birdid.toml", env = "BIRDID_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "BIRDID_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, default_value = "info", env = "BIRDID_LOG")]
    pub log: String,
}
