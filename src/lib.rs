//! Pipeviz - renders pipeline execution structure as a Graphviz diagram

pub mod convert;
pub mod engine;
pub mod error;
pub mod graph;
pub mod normalize;
pub mod pipeline;
pub mod stage;
pub mod walker;

pub use convert::{Converter, OutputFormat};
pub use engine::{GraphvizEngine, ImageFormat, RenderEngine};
pub use error::{FixSuggestion, VizError};
pub use graph::{Edge, GraphNode, NodeStyle, StageGraph};
pub use normalize::top_level_name;
pub use pipeline::{Pipeline, Step};
pub use stage::{DagBuilder, Stage, StageSet};
pub use walker::{traverse_topologically, StepVisitor};
