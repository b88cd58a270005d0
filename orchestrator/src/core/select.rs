//! Selection policy: which steps of the active registry a run executes.

use crate::core::registry::Step;

/// Compute the ordered subset of `registry` to execute.
///
/// - `only` wins outright: a singleton selection, checked before any
///   iteration.
/// - `from` yields the contiguous suffix starting at its first occurrence.
///   The seen-flag never resets, so a `from` that is not a registry member
///   yields an empty selection (the caller treats that as a no-op, not an
///   error at this level).
/// - Neither set: the whole registry in order.
///
/// Mutual exclusion and membership of `from`/`only` are enforced by the run
/// controller before this is called.
pub fn select_steps(registry: &[Step], from: Option<Step>, only: Option<Step>) -> Vec<Step> {
    if let Some(step) = only {
        return vec![step];
    }
    let Some(start) = from else {
        return registry.to_vec();
    };
    let mut seen = false;
    let mut selected = Vec::new();
    for step in registry.iter().copied() {
        if step == start {
            seen = true;
        }
        if seen {
            selected.push(step);
        }
    }
    selected
}
