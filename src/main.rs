use clap::Parser;

use dexter::app;
use dexter::cli::{Cli, Commands};
use dexter::config::Config;
use dexter::error::Result;
use dexter::shell::{self, Shell};
use dexter::snapshot;

fn main() -> Result<()> {
    // Logs go to a file only; the terminal belongs to the menu
    if let Ok(log_file) = std::env::var("DEXTER_LOG") {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
        {
            Ok(file) => {
                env_logger::Builder::new()
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .filter_level(log::LevelFilter::Debug)
                    .init();
                log::info!("Dexter starting up");
            }
            Err(e) => eprintln!("Cannot open log file {}: {}", log_file, e),
        }
    }

    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Init { shell }) => {
            print_init(shell);
            Ok(())
        }
        Some(Commands::Snapshot {
            config,
            output,
            width,
            height,
        }) => snapshot::generate_snapshot(config, output.as_deref(), *width, *height),
        None => app::run(Config::from_cli(&cli)),
    }
}

fn print_init(shell_name: &str) {
    let shell = match shell_name.parse::<Shell>() {
        Ok(shell) => shell,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let binary = std::env::current_exe().unwrap_or_else(|_| "dexter".into());
    print!("{}", shell::wrapper_script(shell, &binary));
}
