// Main entry point for cite-report

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::info;

use cite_report::cli::{Cli, Commands};
use cite_report::commands;
use cite_report::config::{self, Config};
use cite_report::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.verbose {
        info!("Starting cite-report v{}", env!("CARGO_PKG_VERSION"));
    }

    // Load configuration from file (if exists)
    let config_path = Config::discover();
    let loaded = config_path
        .as_deref()
        .and_then(Config::load_from_file);
    let config = loaded.clone().unwrap_or_default();

    // Handle config flag
    if cli.config {
        println!("Current configuration:");
        match (&config_path, &loaded) {
            (Some(path), Some(_)) => println!("  Loaded from: {}", path.display()),
            (Some(path), None) => println!("  Ignored invalid file: {}", path.display()),
            _ => {
                println!("  No configuration file loaded");
                println!("  Create one with: cite-report --init-config .citereportrc.toml");
            }
        }
        println!(
            "  {}: {}",
            config::ENV_CITE_REPORT_CONFIG,
            std::env::var(config::ENV_CITE_REPORT_CONFIG).unwrap_or_else(|_| "not set".into())
        );
        println!("\nEffective settings:\n");
        print!("{}", config.to_toml());
        print_precedence();
        return Ok(());
    }

    // Handle init_config flag
    if let Some(config_file) = &cli.init_config {
        std::fs::write(config_file, Config::default().to_toml())?;
        println!("Configuration file created: {}", config_file.display());
        println!("\nYou can now edit the file to customize your settings.");
        print_precedence();
        return Ok(());
    }

    // Handle completion flag
    if let Some(shell_type) = &cli.completion {
        return commands::handle_completion(shell_type);
    }

    match &cli.command {
        Some(Commands::Parse(args)) => commands::handle_parse(args, &config),
        Some(Commands::Check(args)) => commands::handle_check(args, &config),
        Some(Commands::Inspect(args)) => commands::handle_inspect(args, &config),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

fn print_precedence() {
    println!("\nConfiguration precedence:");
    println!("  1. Command-line arguments (highest)");
    println!("  2. Configuration file");
    println!("  3. Built-in defaults (lowest)");
}
