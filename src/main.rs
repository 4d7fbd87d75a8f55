use anyhow::Result;
use clap::Parser;
use pkgs::cli::Cli;
use pkgs::commands;

fn main() -> Result<()> {
    // Initialize tracing; stderr keeps prompts on stdout readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pkgs=warn,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the interactive session
    commands::execute(cli)
}
