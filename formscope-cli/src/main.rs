//! formscope inspector
//!
//! Evaluates, for one form and one set of page signals, which response the
//! form binds to, which defaults it renders and whether it is submitting.
//!
//! Usage:
//!   formscope --form-id login --action-data response.json --defaults props.json

use anyhow::Result;
use clap::Parser;
use formscope_cli::{inspect, Args};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let report = inspect(&args)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
