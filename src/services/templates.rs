//! Log templates and the rules that render them
//!
//! `${name}` expands to the identifier and `${spec}` to the format
//! specifier picked for the symbol's shape.

use serde::Serialize;
use tracing::debug;

use crate::error::{Degraded, IndexError};
use crate::models::{
    CompositeDetection, ImportRequirement, Language, Symbol, SymbolKind, SynthConfig,
};

pub const NAME_PLACEHOLDER: &str = "${name}";
pub const SPEC_PLACEHOLDER: &str = "${spec}";

/// Built-in print statement for one language
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Template {
    pub language: Language,
    pub template: &'static str,
    pub scalar: &'static str,
    pub composite: &'static str,
    /// `(module, import statement)` the template depends on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import: Option<(&'static str, &'static str)>,
}

static TEMPLATES: &[Template] = &[
    Template {
        language: Language::Go,
        template: "fmt.Printf(\"${name}: ${spec}\\n\", ${name})",
        scalar: "%v",
        composite: "%+v",
        import: Some(("fmt", "import \"fmt\"")),
    },
    Template {
        language: Language::Rust,
        template: "println!(\"${name}: ${spec}\", ${name});",
        scalar: "{:?}",
        composite: "{:#?}",
        import: None,
    },
    Template {
        language: Language::Python,
        template: "print(f'${name}: {${name}${spec}}')",
        scalar: "",
        composite: "!r",
        import: None,
    },
    Template {
        language: Language::JavaScript,
        template: "console.log('${name}:', ${name});",
        scalar: "",
        composite: "",
        import: None,
    },
    Template {
        language: Language::TypeScript,
        template: "console.log('${name}:', ${name});",
        scalar: "",
        composite: "",
        import: None,
    },
    Template {
        language: Language::Java,
        template: "System.out.println(\"${name}: \" + ${name});",
        scalar: "",
        composite: "",
        import: None,
    },
    Template {
        language: Language::CSharp,
        template: "Console.WriteLine($\"${name}: {${name}}\");",
        scalar: "",
        composite: "",
        import: None,
    },
    Template {
        language: Language::PHP,
        template: "var_dump($${name});",
        scalar: "",
        composite: "",
        import: None,
    },
];

pub fn builtin(language: Language) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.language == language)
}

/// Template and specifiers in effect for one language after configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatRules {
    pub language: Language,
    pub template: String,
    pub scalar: String,
    pub composite: String,
    pub detection: CompositeDetection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import: Option<ImportRequirement>,
}

impl FormatRules {
    pub fn builtin(language: Language) -> Result<Self, IndexError> {
        Self::from_config(language, &SynthConfig::default())
    }

    /// Per-language overrides win over the global specifiers, which win over
    /// the built-ins
    pub fn from_config(language: Language, config: &SynthConfig) -> Result<Self, IndexError> {
        let base = builtin(language).ok_or_else(|| IndexError::unsupported(language))?;
        let custom = config.language(language);

        let pick = |own: Option<&String>, global: Option<&String>, fallback: &str| {
            own.or(global)
                .cloned()
                .unwrap_or_else(|| fallback.to_string())
        };

        Ok(Self {
            language,
            template: pick(custom.and_then(|c| c.template.as_ref()), None, base.template),
            scalar: pick(
                custom.and_then(|c| c.scalar.as_ref()),
                config.format_specifier_for_scalar.as_ref(),
                base.scalar,
            ),
            composite: pick(
                custom.and_then(|c| c.composite.as_ref()),
                config.format_specifier_for_composite.as_ref(),
                base.composite,
            ),
            detection: config.composite_detection,
            import: base
                .import
                .filter(|_| config.auto_import)
                .map(|(module, statement)| ImportRequirement::new(module, statement)),
        })
    }

    pub fn specifier_for(&self, symbol: &Symbol) -> &str {
        if symbol.kind == SymbolKind::Struct {
            debug!(name = %symbol.name, "{}", Degraded::UnsupportedSymbolKind(symbol.kind));
            return &self.scalar;
        }
        let composite = match self.detection {
            CompositeDetection::Inferred => symbol.is_composite(),
            CompositeDetection::Always => symbol.kind.is_value(),
            CompositeDetection::Never => false,
        };
        if composite { &self.composite } else { &self.scalar }
    }

    /// Print statement for one symbol, without indentation
    pub fn render(&self, symbol: &Symbol) -> String {
        self.template
            .replace(SPEC_PLACEHOLDER, self.specifier_for(symbol))
            .replace(NAME_PLACEHOLDER, &symbol.name)
    }
}
