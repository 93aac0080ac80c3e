//! Path Rewriter.
//!
//! Pure transform from "what the transcoder produced" to the record's new
//! image fields. Nothing here touches the filesystem.

use std::collections::HashMap;

use crate::hotel::{ImageSet, RefKey};

/// Result of processing one remote reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Converted; holds the new site path.
    Converted(String),
    Failed,
}

/// Apply pipeline outcomes to an image set.
///
/// - References without an outcome (local paths) pass through unchanged.
/// - Converted references take their new site path.
/// - Failed sequence entries are dropped; the survivors keep their order.
/// - A failed single slot keeps its prior value.
pub fn rewrite(images: ImageSet, outcomes: &HashMap<RefKey, Outcome>) -> ImageSet {
    images.map_refs(|reference| match outcomes.get(&reference.key) {
        None => Some(reference.value.clone()),
        Some(Outcome::Converted(path)) => Some(path.clone()),
        Some(Outcome::Failed) if reference.key.in_sequence() => None,
        Some(Outcome::Failed) => Some(reference.value.clone()),
    })
}
