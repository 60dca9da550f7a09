use clap::Parser;
use std::process;

use pensum::cli;
use pensum::cli::commands::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli_args = Cli::parse();
    let json_output = cli_args.json;

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(json_output),
        Commands::Task(cmd) => cli::task::run(cmd, json_output),
        Commands::Status => cli::status::run(json_output),
        Commands::Remind(cmd) => cli::remind::run(cmd, json_output),
        Commands::Settings(cmd) => cli::settings::run(cmd, json_output),
        Commands::Profile(cmd) => cli::profile::run(cmd, json_output),
    };

    process::exit(exit_code);
}
