//! One-shot pipeline-to-image conversion
//!
//! Runs the whole chain sequentially: walk the hierarchy, collapse it
//! into stages, project the graph description, render, write the file.
//! The image is produced fully in memory before the output path is
//! touched, so a failed render leaves no partial file behind.

use std::path::Path;

use tracing::{debug, info};

use crate::engine::{GraphvizEngine, ImageFormat, RenderEngine};
use crate::error::VizError;
use crate::graph::StageGraph;
use crate::pipeline::Pipeline;
use crate::stage::DagBuilder;
use crate::walker::traverse_topologically;

/// Output formats at the conversion surface. `Dot` bypasses the engine
/// and emits the graph description itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
    Dot,
}

pub struct Converter {
    engine: Box<dyn RenderEngine>,
}

impl Converter {
    pub fn new() -> Self {
        Self {
            engine: Box::new(GraphvizEngine::new()),
        }
    }

    pub fn with_engine(engine: Box<dyn RenderEngine>) -> Self {
        Self { engine }
    }

    /// Traverse the pipeline and project its stage DAG, without
    /// touching the engine. Catches dangling parent references.
    pub fn build_graph(&self, pipeline: &Pipeline) -> Result<StageGraph, VizError> {
        let mut builder = DagBuilder::new();
        traverse_topologically(pipeline, &mut builder)?;
        let stages = builder.into_stages();
        debug!(stages = stages.len(), "collapsed hierarchy into stages");
        StageGraph::from_stages(&pipeline.name, &stages)
    }

    /// Full conversion: build, render, write exactly one output file.
    pub fn convert(
        &self,
        pipeline: &Pipeline,
        output: &Path,
        format: OutputFormat,
    ) -> Result<(), VizError> {
        let graph = self.build_graph(pipeline)?;
        let dot = graph.to_dot();

        let bytes = match format {
            OutputFormat::Dot => dot.into_bytes(),
            OutputFormat::Png => self.engine.render(&dot, ImageFormat::Png)?,
            OutputFormat::Svg => self.engine.render(&dot, ImageFormat::Svg)?,
        };

        std::fs::write(output, &bytes)?;
        info!(
            pipeline = %pipeline.name,
            path = %output.display(),
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "wrote graph"
        );
        Ok(())
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}
