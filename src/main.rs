//! ghostlog - Syntax-aware debug log insertion
//!
//! Select an identifier, press the trigger key, get a print statement.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ghostlog::app::App;
use ghostlog::cli::{Cli, Commands};

fn main() {
    // Logs go to stderr; stdout carries JSON (and bridge protocol lines).
    // Use RUST_LOG=ghostlog=debug for verbose output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ghostlog=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!(
                r#"{{"success":false,"error":"Failed to create runtime: {}"}}"#,
                e
            );
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(async_main()) {
        let response = serde_json::json!({
            "success": false,
            "error": e.to_string()
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&response)
                .unwrap_or_else(|_| format!(r#"{{"success":false,"error":"{}"}}"#, e))
        );
        std::process::exit(2);
    }
}

async fn async_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app = App::new()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize: {}", e))?;

    execute_command(cli.command, &app).await
}

async fn execute_command(command: Commands, app: &App) -> anyhow::Result<()> {
    use ghostlog::cli::commands;

    match command {
        // Inspection
        Commands::Index(args) => commands::index::execute(args, app).await,
        Commands::Resolve(args) => commands::resolve::execute(args, app).await,
        Commands::Languages(args) => commands::languages::execute(args, app).await,

        // Log insertion
        Commands::Log(args) => commands::log::execute(args, app).await,
        Commands::Serve(args) => commands::serve::execute(args, app).await,

        Commands::Config(args) => commands::config::execute(args, app).await,
    }
}
