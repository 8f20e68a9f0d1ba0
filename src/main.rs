//! # lineread
//!
//! Command-line tool that merges spectral line-list databases into a single
//! TLI file for the transit radiative-transfer code.
//!
//! ## Usage
//!
//! ```bash
//! # Two HITEMP chunks of the same database plus a CO list
//! lineread -d 01_3750-4000.par -p H2O.pf -t hit \
//!          -d 01_4000-4500.par -p H2O.pf -t hit \
//!          -d 05_hit12.par     -p CO.pf  -t hit \
//!          -i 2.0 -f 2.7 -o h2o_co.tli -v
//!
//! # Same run from a config file
//! lineread -c lineread.toml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.log_level());
    cli::run(cli)
}
