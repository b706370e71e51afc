use anyhow::{bail, Context};
use clap::Parser;
use log::debug;

use logo_encoder::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    debug!("{:?}", cli);

    let succeeded = cli::run(&cli).context("logo-encoder failed")?;
    if !succeeded {
        bail!("logo-encoder finished with errors");
    }
    Ok(())
}
