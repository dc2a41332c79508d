use crate::snapshot::{PullRequestId, PullRequestRecord, Snapshot};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    pub added: BTreeSet<PullRequestId>,
    pub removed: BTreeSet<PullRequestId>,
    pub changed: BTreeSet<PullRequestId>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Records for the added ids, in ascending id order.
    pub fn added_records<'a>(
        &'a self,
        current: &'a Snapshot,
    ) -> impl Iterator<Item = (PullRequestId, &'a PullRequestRecord)> + 'a {
        self.added
            .iter()
            .filter_map(|id| current.get(id).map(|record| (*id, record)))
    }
}

/// Compares the persisted snapshot with a freshly fetched one.
///
/// Without a previous snapshot there is nothing to compare against and the
/// delta is empty: the first run only seeds the store.
pub fn diff(previous: Option<&Snapshot>, current: &Snapshot) -> Delta {
    let Some(previous) = previous else {
        return Delta::default();
    };

    let mut delta = Delta::default();

    for (id, record) in current.iter() {
        match previous.get(id) {
            None => {
                delta.added.insert(*id);
            }
            Some(old) if old != record => {
                delta.changed.insert(*id);
            }
            Some(_) => {}
        }
    }

    delta.removed = previous
        .keys()
        .filter(|id| !current.contains_key(id))
        .copied()
        .collect();

    delta
}
