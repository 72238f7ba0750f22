//! Languages command implementation

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::app::App;
use crate::cli::response::LanguageOutput;
use crate::models::Language;
use crate::services::templates;

#[derive(Args, Debug)]
pub struct LanguagesArgs {}

#[derive(Serialize)]
struct LanguagesResponse {
    count: usize,
    languages: Vec<LanguageOutput>,
}

fn language_table() -> Vec<LanguageOutput> {
    Language::all()
        .into_iter()
        .filter_map(|language| {
            templates::builtin(language).map(|t| LanguageOutput {
                language: language.to_string(),
                extensions: language.extensions(),
                template: t.template,
                scalar: t.scalar,
                composite: t.composite,
                import: t.import.map(|(_, statement)| statement),
            })
        })
        .collect()
}

pub async fn execute(_args: LanguagesArgs, app: &App) -> Result<()> {
    let languages = language_table();
    app.output.print_success_flat(LanguagesResponse {
        count: languages.len(),
        languages,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_a_template() {
        let table = language_table();
        assert_eq!(table.len(), Language::all().len());
        let go = table.iter().find(|l| l.language == "go").unwrap();
        assert_eq!(go.import, Some("import \"fmt\""));
        assert!(go.extensions.contains(&"go"));
    }
}
