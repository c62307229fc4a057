use thiserror::Error;

use crate::format::{escape_markdown, format_seconds};
use crate::stats::{Filter, Ranked, Summary, Timeframe};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    #[error("expected a user name")]
    MissingUser,
    #[error("unknown timeframe `{0}` (expected day, week, month or all)")]
    BadTimeframe(String),
    #[error("unexpected argument `{0}`")]
    Unexpected(String),
}

/// `user <name> [day|week|month|all] [language:<x>] [project:<y>]`
#[derive(Debug, Clone, PartialEq)]
pub struct UserArgs {
    pub user: String,
    pub timeframe: Timeframe,
    pub language: Option<String>,
    pub project: Option<String>,
}

impl UserArgs {
    pub fn parse(args: &[&str], default_timeframe: Timeframe) -> Result<Self, ArgError> {
        let (user, rest) = args.split_first().ok_or(ArgError::MissingUser)?;

        let mut parsed = Self {
            user: user.to_string(),
            timeframe: default_timeframe,
            language: None,
            project: None,
        };

        for arg in rest {
            if let Some(lang) = arg.strip_prefix("language:") {
                parsed.language = Some(lang.to_string());
            } else if let Some(project) = arg.strip_prefix("project:") {
                parsed.project = Some(project.to_string());
            } else if arg.contains(':') {
                return Err(ArgError::Unexpected(arg.to_string()));
            } else {
                parsed.timeframe = arg
                    .parse()
                    .map_err(|_| ArgError::BadTimeframe(arg.to_string()))?;
            }
        }

        Ok(parsed)
    }

    /// Language and project restrictions; the cutoff follows the timeframe.
    pub fn filter(&self) -> Filter {
        Filter {
            cutoff: None,
            language: self.language.clone(),
            project: self.project.clone(),
        }
    }
}

pub fn description(summary: &Summary) -> String {
    format!(
        "Total time programmed in {} `{}`",
        summary.timeframe.description(),
        format_seconds(summary.total_seconds)
    )
}

pub fn field_title(name: &str, ranked: &Ranked, max_len: usize) -> String {
    if ranked.has_more {
        format!("{} (top {})", name, max_len)
    } else {
        name.to_string()
    }
}

pub fn field_body(ranked: &Ranked) -> String {
    if ranked.is_empty() {
        return "-".to_string();
    }

    ranked
        .entries
        .iter()
        .enumerate()
        .map(|(i, (name, secs))| {
            format!(
                "**{}.** {} `{}`",
                i + 1,
                escape_markdown(name),
                format_seconds(*secs)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_only_uses_default_timeframe() {
        let args = UserArgs::parse(&["alice"], Timeframe::Month).unwrap();

        assert_eq!(args.user, "alice");
        assert_eq!(args.timeframe, Timeframe::Month);
        assert_eq!(args.filter(), Filter::default());
    }

    #[test]
    fn all_options() {
        let args =
            UserArgs::parse(&["bob", "language:rust", "week", "project:bot"], Timeframe::Month)
                .unwrap();

        assert_eq!(args.timeframe, Timeframe::Week);
        assert_eq!(args.language.as_deref(), Some("rust"));
        assert_eq!(args.project.as_deref(), Some("bot"));
    }

    #[test]
    fn bad_arguments() {
        assert_eq!(UserArgs::parse(&[], Timeframe::Month), Err(ArgError::MissingUser));
        assert_eq!(
            UserArgs::parse(&["bob", "fortnight"], Timeframe::Month),
            Err(ArgError::BadTimeframe("fortnight".to_string()))
        );
        assert_eq!(
            UserArgs::parse(&["bob", "editor:vim"], Timeframe::Month),
            Err(ArgError::Unexpected("editor:vim".to_string()))
        );
    }

    #[test]
    fn ranked_fields() {
        let ranked = Ranked {
            entries: vec![("rust".to_string(), 5400), ("c_sharp".to_string(), 60)],
            has_more: true,
        };

        assert_eq!(field_title("Languages", &ranked, 2), "Languages (top 2)");
        assert_eq!(
            field_body(&ranked),
            "**1.** rust `1h 30m 0s`\n**2.** c\\_sharp `1m 0s`"
        );
        assert_eq!(field_body(&Ranked::default()), "-");
    }

    #[test]
    fn summary_description() {
        let summary = Summary {
            timeframe: Timeframe::Week,
            total_seconds: 5400,
            top_languages: Ranked::default(),
            top_projects: Ranked::default(),
        };

        assert_eq!(
            description(&summary),
            "Total time programmed in the last 7 days `1h 30m 0s`"
        );
    }
}
