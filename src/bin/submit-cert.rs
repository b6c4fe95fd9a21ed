use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use submit_cert::{Submitter, DEFAULT_SERVER};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Email of the user the certificate is submitted for
    email: String,
    /// Path to the certificate file
    certfile: PathBuf,
    /// Base URL of the dnsZoneLineForCert service
    #[arg(long, default_value = DEFAULT_SERVER)]
    server: String,
    /// Give up after this many seconds, waits forever if unset
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let submitter = Submitter::new(cli.server, cli.timeout.map(Duration::from_secs))?;
    let response = submitter
        .submit(&cli.email, &cli.certfile)
        .await
        .context("Failed to submit certificate.")?;

    println!("{response}");

    Ok(())
}
