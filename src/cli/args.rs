use clap::Parser;
use std::path::PathBuf;

/// Command line arguments for AtLink
#[derive(Parser, Debug)]
#[command(
    name = "atlink",
    version = env!("CARGO_PKG_VERSION"),
    about = "AT command exchange tool for line-oriented serial devices",
    long_about = "Opens a serial device (or a simulated one), sends a single AT command, prints the framed response and disconnects."
)]
pub struct Args {
    /// Serial port path, e.g. /dev/ttyUSB0 or COM3
    #[arg(short, long)]
    pub port: Option<String>,

    /// Baud rate
    #[arg(short, long)]
    pub baud: Option<u32>,

    /// Command to send; CRLF is appended when missing
    #[arg(short, long, default_value = "AT")]
    pub command: String,

    /// Use the simulated device instead of real hardware
    #[arg(long)]
    pub simulate: bool,

    /// Seed for the simulated outcome generator (entropy-seeded when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Response timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
