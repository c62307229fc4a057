use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::timeframe::DayWindow;
use crate::model::ActivityRecord;

/// Accumulated seconds per key.
pub type DurationMap<K> = BTreeMap<K, i64>;

/// Seconds per facet key, iterated in the order keys were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetMap {
    index: HashMap<String, usize>,
    entries: Vec<(String, i64)>,
}

impl FacetMap {
    /// Unnamed keys are skipped.
    fn add(&mut self, key: &str, secs: i64) {
        if key.is_empty() {
            return;
        }

        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += secs,
            None => {
                self.index.insert(key.to_owned(), self.entries.len());
                self.entries.push((key.to_owned(), secs));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl IntoIterator for FacetMap {
    type Item = (String, i64);
    type IntoIter = std::vec::IntoIter<(String, i64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetTotals {
    pub total_seconds: i64,
    /// Languages with a name. Unnamed ones only count towards the total.
    pub languages: FacetMap,
    pub projects: FacetMap,
    /// One entry per day of the window, zero-filled.
    pub days: DurationMap<NaiveDate>,
}

/// Single pass over `records`. Day buckets use the UTC calendar date; records
/// outside `window` still count towards every other total.
pub fn aggregate<'a>(
    records: impl IntoIterator<Item = &'a ActivityRecord>,
    window: Option<&DayWindow>,
) -> FacetTotals {
    let mut totals = FacetTotals {
        days: window
            .map(|w| w.days().map(|d| (d, 0)).collect())
            .unwrap_or_default(),
        ..FacetTotals::default()
    };

    for record in records {
        let secs = record.duration_seconds;

        totals.total_seconds += secs;
        totals.languages.add(&record.language, secs);
        totals.projects.add(&record.project_name, secs);

        if let Some(day) = totals.days.get_mut(&record.start_time.date_naive()) {
            *day += secs;
        }
    }

    totals
}
