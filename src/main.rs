mod commands;
mod config;
mod errors;
mod index;
mod options;
mod platform;
mod scrape;
#[cfg(test)]
mod testing;
mod utils;

use clap::Parser;

use crate::options::verbose::Console;
use crate::utils::download::Fetcher;

fn main() -> anyhow::Result<()> {
    let cli = options::Cli::parse();
    let settings = config::Settings::resolve(cli)?;

    let console = Console::new(settings.verbose);
    let fetcher = Fetcher::new(&console);

    commands::run(&settings, &fetcher, &config::Endpoints::default())?;

    Ok(())
}
