//! Stage accumulation from traversal callbacks
//!
//! A [`Stage`] is a top-level stage name plus the normalized names of
//! the stages it directly consumes from. The [`DagBuilder`] visitor
//! collapses every composite-step callback into a Stage and collects
//! them into an insertion-ordered, fully-deduplicated [`StageSet`].

use std::collections::HashSet;

use crate::error::VizError;
use crate::normalize::top_level_name;
use crate::walker::StepVisitor;

/// One node of the output DAG: a normalized name and its direct
/// producer dependencies. Equality covers the full (name, parents)
/// tuple; two differently-parented records sharing a name are distinct
/// Stages (the renderer merges them per name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stage {
    pub name: String,
    pub parents: Vec<String>,
}

impl Stage {
    /// A source stage has no upstream data dependency
    pub fn is_source(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Set of stages, deduplicated by full equality, encounter order
/// preserved. The order feeds straight into rendering order, which
/// seeds the external layout.
#[derive(Debug, Default)]
pub struct StageSet {
    stages: Vec<Stage>,
    seen: HashSet<Stage>,
}

impl StageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unless an equal stage is already present. Returns whether
    /// the stage was inserted.
    pub fn insert(&mut self, stage: Stage) -> bool {
        if self.seen.contains(&stage) {
            return false;
        }
        self.seen.insert(stage.clone());
        self.stages.push(stage);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stage> {
        self.stages.iter()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Visitor that reduces the hierarchy into a [`StageSet`]
#[derive(Debug, Default)]
pub struct DagBuilder {
    stages: StageSet,
}

impl DagBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_stages(self) -> StageSet {
        self.stages
    }
}

impl StepVisitor for DagBuilder {
    fn leave_composite(&mut self, full_name: &str, inputs: &[String]) -> Result<(), VizError> {
        let parents = inputs
            .iter()
            .map(|input| top_level_name(input).to_string())
            .collect();
        self.stages.insert(Stage {
            name: top_level_name(full_name).to_string(),
            parents,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(name: &str, parents: &[&str]) -> Stage {
        Stage {
            name: name.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn equal_stages_deduplicate() {
        let mut set = StageSet::new();
        assert!(set.insert(stage("A", &[])));
        assert!(!set.insert(stage("A", &[])));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn same_name_different_parents_both_retained() {
        let mut set = StageSet::new();
        assert!(set.insert(stage("A", &[])));
        assert!(set.insert(stage("A", &["B"])));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn encounter_order_preserved() {
        let mut set = StageSet::new();
        set.insert(stage("C", &["A"]));
        set.insert(stage("A", &[]));
        set.insert(stage("B", &["A"]));
        let names: Vec<&str> = set.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn builder_normalizes_name_and_parents() {
        let mut builder = DagBuilder::new();
        builder
            .leave_composite("Score/Model", &["Read/Decode".to_string(), "Clean".to_string()])
            .unwrap();
        let stages: Vec<Stage> = builder.into_stages().iter().cloned().collect();
        assert_eq!(stages, vec![stage("Score", &["Read", "Clean"])]);
    }

    #[test]
    fn nested_composites_collapse_into_one_stage() {
        // Top-level step and its nested composite normalize to the same
        // (name, parents) tuple and deduplicate.
        let mut builder = DagBuilder::new();
        builder.leave_composite("Read/Decode", &[]).unwrap();
        builder.leave_composite("Read", &[]).unwrap();
        let set = builder.into_stages();
        assert_eq!(set.len(), 1);
        assert!(set.iter().next().unwrap().is_source());
    }

    #[test]
    fn source_detection() {
        assert!(stage("A", &[]).is_source());
        assert!(!stage("B", &["A"]).is_source());
    }
}
