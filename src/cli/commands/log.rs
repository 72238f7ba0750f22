//! Log command implementation
//!
//! Resolves the selection, synthesizes print statements and writes them
//! into the file. Running it twice on the same selection is a no-op.

use anyhow::{Context, Result};
use clap::Args;

use crate::app::App;
use crate::cli::commands::open_document;
use crate::cli::response::{LogResponse, LogStatus};
use crate::cli::{OutputContext, ParsedLocation};
use crate::models::{SynthConfig, apply_edits};
use crate::services::FormatRules;

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Selection start (file:line[:column], 1-indexed)
    pub location: String,

    /// Selection end (line[:column]); omit for a caret
    #[arg(long)]
    pub end: Option<String>,

    /// Key the editor saw; only the configured trigger key logs
    #[arg(long)]
    pub key: Option<String>,

    /// Print the edits without writing the file
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn execute(args: LogArgs, app: &App) -> Result<()> {
    let response = log_selection(&args, &app.config().synth, &app.output).await?;
    app.output.print_success_flat(response);
    Ok(())
}

async fn log_selection(
    args: &LogArgs,
    synth: &SynthConfig,
    ctx: &OutputContext,
) -> Result<LogResponse> {
    let location = ParsedLocation::parse(&args.location)?.to_absolute()?;
    let file = ctx.relative_path(&location.file);

    if let Some(key) = &args.key
        && !synth.is_trigger(key)
    {
        return Ok(LogResponse::empty(file, LogStatus::NotTriggered));
    }

    let document = open_document(&location.file).await?;
    let snapshot = document.snapshot();
    location.validate_position_with_content(&snapshot.text)?;

    let selection = location.selection(args.end.as_deref())?;
    let rules = FormatRules::from_config(document.language(), synth)?;
    let Some(directive) = snapshot.synthesize(&selection, &rules) else {
        return Ok(LogResponse::empty(file, LogStatus::NoSymbol));
    };

    let targets = directive
        .target_symbols
        .iter()
        .map(|s| s.name.clone())
        .collect();
    let insertion_line = Some(directive.insertion_line + 1);

    if directive.is_applied(&snapshot.text) {
        return Ok(LogResponse {
            file,
            status: LogStatus::Unchanged,
            targets,
            insertion_line,
            edits: Vec::new(),
        });
    }

    let edits = directive.edits(&snapshot.table, &snapshot.text);
    let status = if args.dry_run {
        LogStatus::Preview
    } else {
        let edited = apply_edits(&snapshot.text, &edits);
        tokio::fs::write(&location.file, edited)
            .await
            .with_context(|| format!("Failed to write file: {}", location.file.display()))?;
        tracing::info!(file = %file, edits = edits.len(), "log lines inserted");
        LogStatus::Applied
    };

    Ok(LogResponse {
        file,
        status,
        targets,
        insertion_line,
        edits,
    })
}
