mod cli;
mod error;
mod filter;
mod fmt;
mod loader;
mod logging;
mod models;
mod reports;
mod session;
mod settings;

use clap::Parser;

use cli::{Cli, Commands, Context};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Config { command } => cli::config::dispatch(command),
        Commands::Report(command) => {
            let settings = settings::load_settings();
            let ctx = Context::resolve(cli.file.as_deref(), cli.format, &settings);
            cli::report::dispatch(command, &ctx)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
