#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

use clap::Parser;

mod cli;
mod findings;

fn main() -> anyhow::Result<()> {
    cli::Args::parse().run()
}
