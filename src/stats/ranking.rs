/// A descending top-N list of facet totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranked {
    pub entries: Vec<(String, i64)>,
    /// More distinct keys existed than fit in the list.
    pub has_more: bool,
}

impl Ranked {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sorts by descending seconds and keeps the first `max_len`.
///
/// The sort is stable: keys with equal totals stay in the order they were given.
pub fn rank(durations: impl IntoIterator<Item = (String, i64)>, max_len: usize) -> Ranked {
    let mut entries: Vec<(String, i64)> = durations.into_iter().collect();
    let has_more = entries.len() > max_len;

    entries.sort_by(|(_, a), (_, b)| b.cmp(a));
    entries.truncate(max_len);

    Ranked { entries, has_more }
}
