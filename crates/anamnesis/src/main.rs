//! Anamnesis service binary.
//!
//! Runs the HTTP surface for the session pipeline, or the configuration and
//! migration utilities.

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands};

    let cli = Cli::parse();

    if cli.verbose && std::env::var_os("RUST_LOG").is_none() {
        // Single-threaded here, the runtime has not started yet
        unsafe { std::env::set_var("RUST_LOG", "debug") };
    }

    anamnesis_core::init_telemetry()?;

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async {
        match cli.command {
            Commands::Serve { config } => cli::run_serve(config.as_deref()).await,
            Commands::CheckConfig { config } => cli::check_config(config.as_deref()),
            Commands::Migrate { config } => cli::run_migrate(config.as_deref()),
        }
    });

    anamnesis_core::shutdown_telemetry();
    result?;
    Ok(())
}
