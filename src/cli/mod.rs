//! CLI module for ghostlog
//!
//! Provides command-line interface using clap derive macros.

pub mod commands;
pub mod location;
pub mod output;
pub mod response;

pub use location::ParsedLocation;
pub use output::OutputContext;

use clap::{Parser, Subcommand};

use commands::{
    config::ConfigArgs, index::IndexArgs, languages::LanguagesArgs, log::LogArgs,
    resolve::ResolveArgs, serve::ServeArgs,
};

const LONG_ABOUT: &str = r#"
ghostlog - Insert debug print statements for the identifiers you select

ghostlog parses a buffer with tree-sitter, finds the declarations under a
caret or selection, and writes a print statement for each one on the line
after its declaration, in the buffer's own language.

QUICK START:
  ghostlog log main.go:4:2                 # Log the variable at line 4
  ghostlog log app.js:2 --end 3            # Log everything declared on lines 2-3
  ghostlog log main.go:4:2 --dry-run       # Show the edits only

EDITOR INTEGRATION:
  ghostlog serve                           # JSON-RPC 2.0 lines on stdio

INSPECTION:
  ghostlog index main.go
  ghostlog resolve main.go:4:2
  ghostlog languages
"#;

/// ghostlog - Syntax-aware debug log insertion
#[derive(Parser, Debug)]
#[command(name = "ghostlog")]
#[command(author, version, about, long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
#[command(after_help = "Use 'ghostlog <COMMAND> --help' for more information about a command.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the symbol table of a file
    Index(IndexArgs),

    /// List the symbols a selection resolves to
    Resolve(ResolveArgs),

    /// Insert log statements for a selection
    Log(LogArgs),

    /// Run the editor bridge on stdio
    Serve(ServeArgs),

    /// List supported languages and their log templates
    Languages(LanguagesArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_log_flags() {
        let cli = Cli::parse_from([
            "ghostlog", "log", "main.go:4:2", "--end", "6", "--key", "l", "--dry-run",
        ]);
        let Commands::Log(args) = cli.command else {
            panic!("expected log command");
        };
        assert_eq!(args.location, "main.go:4:2");
        assert_eq!(args.end.as_deref(), Some("6"));
        assert_eq!(args.key.as_deref(), Some("l"));
        assert!(args.dry_run);
    }
}
