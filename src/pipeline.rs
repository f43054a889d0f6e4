//! Pipeline definition parsing structures
//!
//! A pipeline is a tree of steps. A step with nested `steps` is
//! composite and is the unit of visualization; a step without nested
//! steps is primitive. `inputs` lists the fully-qualified (`/`-joined)
//! paths of the steps producing this step's declared inputs.

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::VizError;

/// One path segment: starts with a letter, no `/` anywhere.
static STEP_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9 ._-]*$").unwrap());

/// Pipeline parsed from YAML
#[derive(Debug, Deserialize)]
pub struct Pipeline {
    /// Descriptive label, used as the rendered graph's title
    #[serde(rename = "pipeline")]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct Step {
    pub name: String,
    /// Fully-qualified paths of the steps producing this step's inputs
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Step {
    /// A step with nested sub-steps is composite
    pub fn is_composite(&self) -> bool {
        !self.steps.is_empty()
    }
}

impl Pipeline {
    /// Parse a pipeline definition and validate its step names
    pub fn from_yaml(yaml: &str) -> Result<Self, VizError> {
        let pipeline: Pipeline = serde_yaml::from_str(yaml)?;
        pipeline.validate()?;
        debug!(pipeline = %pipeline.name, steps = pipeline.steps.len(), "parsed pipeline definition");
        Ok(pipeline)
    }

    /// Read and parse a pipeline definition file
    pub fn load(path: &Path) -> Result<Self, VizError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    fn validate(&self) -> Result<(), VizError> {
        validate_steps(&self.steps, "")
    }
}

/// Step names must match [`STEP_NAME`] and siblings must be unique,
/// otherwise fully-qualified names are ambiguous.
fn validate_steps(steps: &[Step], parent: &str) -> Result<(), VizError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(steps.len());

    for step in steps {
        if !STEP_NAME.is_match(&step.name) {
            return Err(VizError::Hierarchy {
                detail: format!("invalid step name '{}' under '{}'", step.name, display_scope(parent)),
            });
        }
        if !seen.insert(step.name.as_str()) {
            return Err(VizError::Hierarchy {
                detail: format!("duplicate step name '{}' under '{}'", step.name, display_scope(parent)),
            });
        }

        let full = if parent.is_empty() {
            step.name.clone()
        } else {
            format!("{parent}/{}", step.name)
        };
        validate_steps(&step.steps, &full)?;
    }

    Ok(())
}

fn display_scope(parent: &str) -> &str {
    if parent.is_empty() { "<root>" } else { parent }
}
