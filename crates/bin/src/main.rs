mod cli;
mod commands;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("duomodel=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format.into();
    let options = commands::LoadOptions {
        sort_hash_keys: !cli.no_sort,
    };

    match &cli.command {
        Commands::Dump(args) => commands::dump::run(args, &options, format),
        Commands::Keys(args) => commands::keys::run(args, &options, format),
        Commands::Get(args) => commands::get::run(args, &options, format),
        Commands::Encode(args) => commands::encode::run(args, &options),
    }
}
