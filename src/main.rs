use anyhow::Context;
use clap::Parser;
use photofeed::cli::{self, output, Cli, Commands};

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Migrate(args) => cli::migrate::execute(args).context("migrate failed"),
        Commands::Tables(args) => cli::tables::execute(args).context("tables failed"),
        Commands::Check(args) => cli::check::execute(args).context("configuration check failed"),
    }
}
