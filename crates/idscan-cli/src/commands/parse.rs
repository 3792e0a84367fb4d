use anyhow::{Context, Result};
use clap::Args;
use idscan_core::payload::parse_payload;

use crate::summary::print_record;

#[derive(Args)]
pub struct ParseArgs {
    /// Raw payload, e.g. "001090012345|123456789|Nguyen Van A|01011990|Nam|Hue"
    pub payload: String,
}

pub fn run(args: &ParseArgs) -> Result<()> {
    let record = parse_payload(&args.payload).context("Not an ID card payload")?;
    print_record(&record);
    Ok(())
}
