//! Faceted summaries of a user's activity records.

use chrono::{DateTime, Utc};

pub use self::facets::{aggregate, DurationMap};
pub use self::filter::Filter;
pub use self::ranking::{rank, Ranked};
pub use self::timeframe::{DayWindow, Timeframe};
use crate::error::{Error, Result};
use crate::model::ActivityRecord;

mod facets;
mod filter;
mod ranking;
mod timeframe;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub timeframe: Timeframe,
    pub total_seconds: i64,
    pub top_languages: Ranked,
    pub top_projects: Ranked,
}

/// Totals and top lists for the records matching `filter` within `timeframe`.
///
/// The timeframe's cutoff applies unless `filter` already carries one.
/// Fails with [`Error::EmptyInput`] when nothing matches.
pub fn summarize(
    records: &[ActivityRecord],
    filter: &Filter,
    timeframe: Timeframe,
    now: DateTime<Utc>,
    max_list_length: usize,
) -> Result<Summary> {
    let filter = Filter {
        cutoff: filter.cutoff.or_else(|| timeframe.cutoff(now)),
        ..filter.clone()
    };

    let mut matched = filter.apply(records).peekable();
    if matched.peek().is_none() {
        return Err(Error::EmptyInput);
    }

    let totals = aggregate(matched, None);

    tracing::debug!(
        %timeframe,
        total_seconds = totals.total_seconds,
        languages = totals.languages.len(),
        projects = totals.projects.len(),
        "summarized activity"
    );

    Ok(Summary {
        timeframe,
        total_seconds: totals.total_seconds,
        top_languages: rank(totals.languages, max_list_length),
        top_projects: rank(totals.projects, max_list_length),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn week_scenario() {
        let recs = vec![
            ActivityRecord::new(at(1, 12), 3600, "", "go"),
            ActivityRecord::new(at(3, 12), 1800, "", "go"),
        ];

        let summary = summarize(&recs, &Filter::default(), Timeframe::Week, at(7, 12), 15).unwrap();

        assert_eq!(summary.total_seconds, 5400);
        assert_eq!(summary.top_languages.entries, vec![("go".to_string(), 5400)]);
        assert!(summary.top_projects.is_empty());
    }

    #[test]
    fn timeframe_cutoff_applies() {
        let recs = vec![
            ActivityRecord::new(at(1, 12), 3600, "old", "go"),
            ActivityRecord::new(at(20, 12), 60, "new", "rust"),
        ];

        let summary = summarize(&recs, &Filter::default(), Timeframe::Day, at(21, 0), 15).unwrap();

        assert_eq!(summary.total_seconds, 60);
        assert_eq!(summary.top_projects.entries, vec![("new".to_string(), 60)]);
    }

    #[test]
    fn nothing_matching_is_empty_input() {
        let recs = vec![ActivityRecord::new(at(1, 12), 3600, "", "go")];
        let filter = Filter {
            language: Some("rust".to_string()),
            ..Filter::default()
        };

        let result = summarize(&recs, &filter, Timeframe::All, at(7, 12), 15);

        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn zero_duration_is_not_empty_input() {
        let recs = vec![ActivityRecord::new(at(6, 12), 0, "", "go")];

        let summary = summarize(&recs, &Filter::default(), Timeframe::Week, at(7, 12), 15).unwrap();

        assert_eq!(summary.total_seconds, 0);
    }

    #[test]
    fn tied_languages_rank_in_first_seen_order() {
        let recs = vec![
            ActivityRecord::new(at(5, 10), 100, "", "zig"),
            ActivityRecord::new(at(5, 11), 300, "", "rust"),
            ActivityRecord::new(at(5, 12), 100, "", "ada"),
        ];

        let summary = summarize(&recs, &Filter::default(), Timeframe::All, at(7, 12), 15).unwrap();

        assert_eq!(
            summary.top_languages.entries,
            vec![
                ("rust".to_string(), 300),
                ("zig".to_string(), 100),
                ("ada".to_string(), 100),
            ]
        );
    }

    #[test]
    fn truncated_languages() {
        let recs: Vec<_> = (0..20)
            .map(|i| ActivityRecord::new(at(5, 12), 1000 - i, "", format!("lang{}", i)))
            .collect();

        let summary = summarize(&recs, &Filter::default(), Timeframe::All, at(7, 12), 10).unwrap();

        assert_eq!(summary.top_languages.entries.len(), 10);
        assert!(summary.top_languages.has_more);
    }
}
