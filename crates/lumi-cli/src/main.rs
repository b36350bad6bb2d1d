use clap::{Parser, Subcommand};

mod app;
mod commands;
mod logging;
mod ui;

#[derive(Parser)]
#[command(name = "lumi", version, about = "Lumi focus timer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive terminal timer (default)
    Run(commands::run::RunArgs),
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init();

    let result = match cli.command {
        None => commands::run::run(commands::run::RunArgs::default()),
        Some(Commands::Run(args)) => commands::run::run(args),
        Some(Commands::Config { action }) => commands::config::run(action).map_err(Into::into),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
