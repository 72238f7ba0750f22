//! Serve command implementation

use anyhow::Result;
use clap::Args;

use crate::app::App;
use crate::bridge::BridgeServer;

#[derive(Args, Debug)]
pub struct ServeArgs {}

/// Run the editor bridge on stdio. Stdout carries protocol lines only.
pub async fn execute(_args: ServeArgs, app: &App) -> Result<()> {
    let mut server = BridgeServer::new(app.config());
    server.serve_stdio().await?;
    Ok(())
}
