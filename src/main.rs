// AtLink - AT command exchange tool for serial devices
use atlink::cli::args::Args;
use atlink::cli::commands::execute;
use atlink::domain::error::AtLinkError;
use atlink::infrastructure::logging::init_logging;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), AtLinkError> {
    let args = Args::parse();

    if !args.quiet {
        if let Err(e) = init_logging(args.verbose) {
            eprintln!("Warning: failed to initialize logging: {}", e);
        }
    }

    match execute(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
