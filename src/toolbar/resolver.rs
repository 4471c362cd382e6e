//! Formatting state resolution: which actions does the selection already carry?

use crate::toolbar::action::ActionDescriptor;
use crate::toolbar::selection::SelectionSnapshot;
use std::collections::BTreeSet;

/// Names of the actions whose formatting applies to the selection.
pub type ActiveSet = BTreeSet<String>;

/// Compute the active set for `snapshot` against `actions`.
///
/// Pure: the result depends only on the ancestor chain carried by the
/// snapshot, which the host has already restricted to elements containing the
/// whole selection. A collapsed caret resolves against the elements around
/// it. No selection means nothing is active.
pub fn resolve(snapshot: Option<&SelectionSnapshot>, actions: &[ActionDescriptor]) -> ActiveSet {
    let Some(snapshot) = snapshot else {
        return ActiveSet::new();
    };
    actions
        .iter()
        .filter(|action| {
            snapshot
                .ancestors
                .iter()
                .any(|ancestor| action.query().matches(ancestor))
        })
        .map(|action| action.name().to_string())
        .collect()
}

/// Single-action form of [`resolve`].
pub fn is_active(action: &ActionDescriptor, snapshot: Option<&SelectionSnapshot>) -> bool {
    snapshot.is_some_and(|s| s.ancestors.iter().any(|a| action.query().matches(a)))
}
