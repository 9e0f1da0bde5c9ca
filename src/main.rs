use clap::Parser;
use coopt_aligner::cli::Cli;
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    cli.run(&mut out)?;
    out.flush()?;
    Ok(())
}
