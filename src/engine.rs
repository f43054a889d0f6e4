//! Rendering engine abstraction
//!
//! The graph layout itself is delegated to an external engine. The
//! production engine pipes DOT text into the system `dot` process and
//! captures the image bytes it emits; tests implement [`RenderEngine`]
//! with in-process doubles.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::VizError;

/// Raster formats the engine can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    fn dot_flag(&self) -> &'static str {
        match self {
            ImageFormat::Png => "-Tpng",
            ImageFormat::Svg => "-Tsvg",
        }
    }
}

/// Turns a DOT graph description into image bytes
pub trait RenderEngine: Send + Sync {
    fn name(&self) -> &str;
    fn render(&self, dot: &str, format: ImageFormat) -> Result<Vec<u8>, VizError>;
}

/// Production engine backed by the Graphviz `dot` binary
pub struct GraphvizEngine {
    binary: String,
}

impl GraphvizEngine {
    pub fn new() -> Self {
        Self {
            binary: "dot".to_string(),
        }
    }

    /// Use a non-default layout binary (e.g. an absolute path)
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for GraphvizEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderEngine for GraphvizEngine {
    fn name(&self) -> &str {
        "graphviz"
    }

    fn render(&self, dot: &str, format: ImageFormat) -> Result<Vec<u8>, VizError> {
        let mut child = Command::new(&self.binary)
            .arg(format.dot_flag())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| VizError::Render {
                detail: format!("failed to start '{}': {e}", self.binary),
            })?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(dot.as_bytes()).map_err(|e| VizError::Render {
                detail: format!("failed to pipe graph into '{}': {e}", self.binary),
            })?;
        }

        // Closes stdin, then collects stdout/stderr to completion.
        let output = child.wait_with_output().map_err(|e| VizError::Render {
            detail: format!("failed to collect output of '{}': {e}", self.binary),
        })?;

        if !output.status.success() {
            return Err(VizError::Render {
                detail: format!(
                    "'{}' exited with {}: {}",
                    self.binary,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        debug!(engine = self.name(), bytes = output.stdout.len(), "engine produced image");
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_a_render_error() {
        let engine = GraphvizEngine::with_binary("pipeviz-no-such-binary");
        let err = engine.render("strict digraph \"t\" {}\n", ImageFormat::Png).unwrap_err();
        match err {
            VizError::Render { detail } => assert!(detail.contains("pipeviz-no-such-binary")),
            other => panic!("expected Render, got {other:?}"),
        }
    }

    #[test]
    fn failing_engine_reports_exit_and_stderr() {
        // `false` ignores its arguments and exits 1 with no output.
        let engine = GraphvizEngine::with_binary("false");
        let err = engine.render("strict digraph \"t\" {}\n", ImageFormat::Png).unwrap_err();
        assert!(matches!(err, VizError::Render { .. }));
    }
}
