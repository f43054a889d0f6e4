//! Post-order traversal of the pipeline step hierarchy
//!
//! The walker visits every composite step, children before the
//! enclosing step, and reports each one to a [`StepVisitor`] with its
//! fully-qualified name and the fully-qualified names of its input
//! producers. Primitive steps are never reported directly; they only
//! show up as input producers of some composite step.

use crate::error::VizError;
use crate::pipeline::{Pipeline, Step};

/// Callback protocol for the traversal.
///
/// `leave_composite` fires once per composite step, after that step's
/// children have been visited. Sibling order is the pipeline's own
/// declaration order; the walker adds no ordering beyond that.
pub trait StepVisitor {
    fn leave_composite(&mut self, full_name: &str, inputs: &[String]) -> Result<(), VizError>;
}

/// Walk the whole hierarchy, invoking the visitor at each composite
/// step. Read-only; the traversal never mutates the pipeline.
pub fn traverse_topologically(
    pipeline: &Pipeline,
    visitor: &mut dyn StepVisitor,
) -> Result<(), VizError> {
    for step in &pipeline.steps {
        visit_step(step, "", visitor)?;
    }
    Ok(())
}

fn visit_step(step: &Step, parent: &str, visitor: &mut dyn StepVisitor) -> Result<(), VizError> {
    let full_name = if parent.is_empty() {
        step.name.clone()
    } else {
        format!("{parent}/{}", step.name)
    };

    for child in &step.steps {
        visit_step(child, &full_name, visitor)?;
    }

    if step.is_composite() {
        visitor.leave_composite(&full_name, &step.inputs)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every callback in order
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(String, Vec<String>)>,
    }

    impl StepVisitor for Recorder {
        fn leave_composite(&mut self, full_name: &str, inputs: &[String]) -> Result<(), VizError> {
            self.calls.push((full_name.to_string(), inputs.to_vec()));
            Ok(())
        }
    }

    fn walk(yaml: &str) -> Vec<(String, Vec<String>)> {
        let pipeline = Pipeline::from_yaml(yaml).unwrap();
        let mut recorder = Recorder::default();
        traverse_topologically(&pipeline, &mut recorder).unwrap();
        recorder.calls
    }

    #[test]
    fn children_reported_before_enclosing_step() {
        let calls = walk(
            r#"
pipeline: Nested
steps:
  - name: Outer
    steps:
      - name: Middle
        steps:
          - name: Leaf
"#,
        );
        let names: Vec<&str> = calls.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Outer/Middle", "Outer"]);
    }

    #[test]
    fn primitive_steps_are_not_reported() {
        let calls = walk(
            r#"
pipeline: Flat
steps:
  - name: Lone
  - name: Read
    steps:
      - name: Open
      - name: Decode
"#,
        );
        let names: Vec<&str> = calls.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Read"]);
    }

    #[test]
    fn inputs_are_passed_through_unresolved() {
        let calls = walk(
            r#"
pipeline: Wired
steps:
  - name: Read
    steps:
      - name: Decode
  - name: Score
    inputs: [Read/Decode, Elsewhere/Never]
    steps:
      - name: Model
"#,
        );
        assert_eq!(calls[1].0, "Score");
        // Unknown producers pass through; render-time lookup decides.
        assert_eq!(calls[1].1, vec!["Read/Decode", "Elsewhere/Never"]);
    }

    #[test]
    fn siblings_keep_declaration_order() {
        let calls = walk(
            r#"
pipeline: Order
steps:
  - name: A
    steps: [{ name: X }]
  - name: B
    steps: [{ name: Y }]
  - name: C
    steps: [{ name: Z }]
"#,
        );
        let names: Vec<&str> = calls.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn nested_composites_report_full_paths() {
        let calls = walk(
            r#"
pipeline: Deep
steps:
  - name: Top
    steps:
      - name: Mid
        inputs: [Top/Other]
        steps:
          - name: Leaf
      - name: Other
"#,
        );
        assert_eq!(calls[0].0, "Top/Mid");
        assert_eq!(calls[0].1, vec!["Top/Other"]);
        assert_eq!(calls[1].0, "Top");
    }
}
