//! Stage name normalization
//!
//! Execution hierarchies nest dozens of sub-steps under one logical
//! stage; collapsing a fully-qualified name to its outermost segment is
//! what keeps the diagram legible.

/// Reduce a fully-qualified hierarchical name to its top-level segment.
///
/// Returns the substring before the first `/`, or the whole string when
/// no delimiter is present.
pub fn top_level_name(full_name: &str) -> &str {
    full_name.split('/').next().unwrap_or(full_name)
}
