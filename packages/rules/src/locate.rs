//! Locator strategies for the backtracking split rule.
//!
//! A locator yields the candidate byte indices of an anchor literal, in the
//! order they should be attempted. The same anchor often also occurs inside a
//! nested construct where one side fails to parse, so a locator yields every
//! occurrence, not just the first.

use crate::cursor::shallow_anchor_indices;

pub trait Locator: Send + Sync {
    /// Candidate split indices in trial order.
    fn locate(&self, input: &str, anchor: &str) -> Vec<usize>;
}

/// Tries occurrences left-to-right.
pub struct FirstLocator;

impl Locator for FirstLocator {
    fn locate(&self, input: &str, anchor: &str) -> Vec<usize> {
        if anchor.is_empty() {
            return Vec::new();
        }
        input.match_indices(anchor).map(|(index, _)| index).collect()
    }
}

/// Tries occurrences right-to-left, scanning outward from the end.
pub struct LastLocator;

impl Locator for LastLocator {
    fn locate(&self, input: &str, anchor: &str) -> Vec<usize> {
        if anchor.is_empty() {
            return Vec::new();
        }
        input.rmatch_indices(anchor).map(|(index, _)| index).collect()
    }
}

/// Only yields occurrences at bracket depth zero, outside quotes and line
/// comments. Used where the anchor also appears inside nested constructs,
/// e.g. the argument list opener of an invocation.
pub struct ShallowLocator;

impl Locator for ShallowLocator {
    fn locate(&self, input: &str, anchor: &str) -> Vec<usize> {
        shallow_anchor_indices(input, anchor)
    }
}
