use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One coding session as reported by the activity service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActivityRecord {
    #[serde(deserialize_with = "utc_timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "duration")]
    pub duration_seconds: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub project_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub language: String,
}

impl ActivityRecord {
    #[cfg(test)]
    pub fn new(
        start_time: DateTime<Utc>,
        duration_seconds: i64,
        project_name: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            duration_seconds,
            project_name: project_name.into(),
            language: language.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeaderboardMember {
    pub username: String,
    pub time_coded: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Leaderboard {
    pub invite: String,
    pub members: Vec<LeaderboardMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Friend {
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelfUser {
    pub friend_code: String,
    pub username: String,
}

/// Query parameters accepted by the activity endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivityQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_duration: Option<i64>,
}

// The service sends either RFC 3339 or naive timestamps; naive ones are UTC.
fn utc_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(d)?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}
