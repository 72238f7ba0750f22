//! Resolve command implementation

use anyhow::Result;
use clap::Args;

use crate::app::App;
use crate::cli::ParsedLocation;
use crate::cli::commands::open_document;
use crate::cli::response::SymbolsResponse;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Selection start (file:line[:column], 1-indexed)
    pub location: String,

    /// Selection end (line[:column]); omit for a caret
    #[arg(long)]
    pub end: Option<String>,
}

pub async fn execute(args: ResolveArgs, app: &App) -> Result<()> {
    let location = ParsedLocation::parse(&args.location)?.to_absolute()?;
    let document = open_document(&location.file).await?;
    let snapshot = document.snapshot();
    location.validate_position_with_content(&snapshot.text)?;

    let selection = location.selection(args.end.as_deref())?;
    let symbols = snapshot.resolve(&selection);
    app.output.print_success_flat(SymbolsResponse::new(&symbols));
    Ok(())
}
