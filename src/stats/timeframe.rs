use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::ActivityRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Day,
    Week,
    #[default]
    Month,
    All,
}

impl Timeframe {
    /// Records must start strictly after this instant. `None` keeps everything.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Timeframe::Day => Some(now - Duration::days(1)),
            Timeframe::Week => Some(now - Duration::days(7)),
            Timeframe::Month => Some(now - Duration::days(30)),
            Timeframe::All => None,
        }
    }

    /// Number of calendar days covered by the window, always at least 1.
    ///
    /// For `All` this is the number of whole days since the earliest record,
    /// rounded up, and widened by one when the earliest record's time of day is
    /// later than `now`'s so that its calendar day still falls inside the window.
    pub fn day_amount(self, records: &[ActivityRecord], now: DateTime<Utc>) -> Result<u32> {
        match self {
            Timeframe::Day => Ok(1),
            Timeframe::Week => Ok(7),
            Timeframe::Month => Ok(30),
            Timeframe::All => {
                let earliest = records
                    .iter()
                    .map(|r| r.start_time)
                    .min()
                    .ok_or(Error::EmptyInput)?;

                let elapsed = (now - earliest).num_milliseconds().max(0);
                let day_ms = Duration::days(1).num_milliseconds();
                let mut days = ((elapsed + day_ms - 1) / day_ms).max(1);

                if earliest.date_naive() < now.date_naive() - Duration::days(days - 1) {
                    days += 1;
                }

                Ok(days as u32)
            }
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Timeframe::Day => "the past day",
            Timeframe::Week => "the last 7 days",
            Timeframe::Month => "the last 30 days",
            Timeframe::All => "total",
        }
    }
}

impl FromStr for Timeframe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "day" => Ok(Timeframe::Day),
            "week" => Ok(Timeframe::Week),
            "month" => Ok(Timeframe::Month),
            "all" => Ok(Timeframe::All),
            other => Err(Error::UnknownTimeframe(other.to_string())),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Timeframe::Day => "day",
            Timeframe::Week => "week",
            Timeframe::Month => "month",
            Timeframe::All => "all",
        };

        f.write_str(name)
    }
}

/// The dense run of UTC calendar days a chart or day map covers, ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub first: NaiveDate,
    pub day_amount: u32,
}

impl DayWindow {
    pub fn resolve(
        timeframe: Timeframe,
        records: &[ActivityRecord],
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let day_amount = timeframe.day_amount(records, now)?;
        let first = now.date_naive() - Duration::days(i64::from(day_amount) - 1);

        Ok(Self { first, day_amount })
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.first && (day - self.first).num_days() < i64::from(self.day_amount)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.first
            .iter_days()
            .take(self.day_amount as usize)
    }
}
