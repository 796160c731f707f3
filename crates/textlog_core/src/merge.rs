//! Query-time coalescing of adjacent compatible actions.

use crate::action::Action;

/// Fold each maximal run of mergeable neighbours into a single action.
///
/// A single forward pass keeps one pending action and tries to absorb the
/// next one into it; on the first incompatible neighbour the pending action
/// is emitted. Every pair in the output is therefore unmergeable, which makes
/// the transformation idempotent.
pub fn merge_actions<I>(actions: I) -> Vec<Action>
where
    I: IntoIterator<Item = Action>,
{
    let mut merged = Vec::new();
    let mut pending: Option<Action> = None;

    for next in actions {
        pending = Some(match pending.take() {
            None => next,
            Some(current) => match current.merge_with(&next) {
                Some(combined) => {
                    tracing::trace!("Merged {} into {}", next, combined);
                    combined
                }
                None => {
                    merged.push(current);
                    next
                }
            },
        });
    }
    merged.extend(pending);
    merged
}
