//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
#[derive(Error, Debug)]
pub enum VizError {
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed pipeline hierarchy: {detail}")]
    Hierarchy { detail: String },

    #[error("Stage '{stage}' lists parent '{parent}', but no stage with that name was rendered")]
    DanglingParent { stage: String, parent: String },

    #[error("Render engine failed: {detail}")]
    Render { detail: String },
}

impl FixSuggestion for VizError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            VizError::Parse(_) => Some("Check YAML syntax: indentation and quoting"),
            VizError::Io(_) => Some("Check file path and permissions"),
            VizError::Hierarchy { .. } => {
                Some("Step names must start with a letter and segments may not contain '/'")
            }
            VizError::DanglingParent { .. } => {
                Some("Each inputs: entry must be the full path of a step declared earlier in the pipeline")
            }
            VizError::Render { .. } => {
                Some("Check that Graphviz is installed and 'dot' is on PATH, or use --format dot")
            }
        }
    }
}
