//! Index command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::App;
use crate::cli::commands::open_document;
use crate::cli::response::IndexResponse;

#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Source file to index
    pub file: PathBuf,
}

pub async fn execute(args: IndexArgs, app: &App) -> Result<()> {
    let path = args
        .file
        .canonicalize()
        .with_context(|| format!("File not found: {}", args.file.display()))?;

    let document = open_document(&path).await?;
    let snapshot = document.snapshot();
    tracing::debug!(
        file = %path.display(),
        symbols = snapshot.table.symbols.len(),
        partial = snapshot.table.partial,
        "indexed"
    );

    let ctx = &app.output;
    ctx.print_success_flat(IndexResponse::new(ctx.relative_path(&path), &snapshot.table));
    Ok(())
}
