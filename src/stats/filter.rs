use chrono::{DateTime, Utc};

use crate::model::ActivityRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub cutoff: Option<DateTime<Utc>>,
    pub language: Option<String>,
    pub project: Option<String>,
}

impl Filter {
    pub fn since(cutoff: Option<DateTime<Utc>>) -> Self {
        Self {
            cutoff,
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &ActivityRecord) -> bool {
        self.cutoff.map_or(true, |c| record.start_time > c)
            && self
                .language
                .as_ref()
                .map_or(true, |l| record.language == *l)
            && self
                .project
                .as_ref()
                .map_or(true, |p| record.project_name == *p)
    }

    /// Lazily yields the matching records in their original order.
    pub fn apply<'a>(
        &'a self,
        records: &'a [ActivityRecord],
    ) -> impl Iterator<Item = &'a ActivityRecord> + 'a {
        records.iter().filter(move |r| self.matches(r))
    }
}
