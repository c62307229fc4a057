use crate::format::{escape_markdown, format_seconds};
use crate::model::LeaderboardMember;

pub const BUTTON_NAME: &str = "leaderboard";
pub const TITLE: &str = "Leaderboard (Past 7 days)";

/// One page of the leaderboard, ranked by time coded.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardPage {
    pub page: usize,
    /// `(rank, member)`, ranks start at 1.
    pub entries: Vec<(usize, LeaderboardMember)>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl LeaderboardPage {
    /// Pages past the end wrap around to the first one.
    pub fn build(members: &[LeaderboardMember], page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let page_count = (members.len() + per_page - 1) / per_page;
        let page = if page >= page_count { 0 } else { page };

        let mut sorted = members.to_vec();
        sorted.sort_by(|a, b| b.time_coded.cmp(&a.time_coded));

        let entries = sorted
            .into_iter()
            .enumerate()
            .skip(page * per_page)
            .take(per_page)
            .map(|(i, m)| (i + 1, m))
            .collect();

        Self {
            page,
            entries,
            has_previous: page > 0,
            has_next: members.len() > per_page * (page + 1),
        }
    }

    pub fn body(&self) -> String {
        self.entries
            .iter()
            .map(|(rank, m)| {
                format!(
                    "**{}.** {} - `{}`",
                    rank,
                    escape_markdown(&m.username),
                    format_seconds(m.time_coded)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Button id encoding the invoking user and the target page.
pub fn button_id(user_id: u64, page: usize) -> String {
    format!("{}.{}.{}", BUTTON_NAME, user_id, page)
}

/// Reads back the `(user, page)` arguments of a leaderboard button.
pub fn parse_button_args(args: &[&str]) -> Option<(u64, usize)> {
    match args {
        [user, page] => Some((user.parse().ok()?, page.parse().ok()?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(n: usize) -> Vec<LeaderboardMember> {
        (0..n)
            .map(|i| LeaderboardMember {
                username: format!("user{}", i),
                time_coded: i as i64 * 10,
            })
            .collect()
    }

    #[test]
    fn first_page_is_ranked() {
        let page = LeaderboardPage::build(&members(5), 0, 2);

        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[0].0, 1);
        assert_eq!(page.entries[0].1.username, "user4");
        assert_eq!(page.entries[1].1.username, "user3");
        assert!(!page.has_previous);
        assert!(page.has_next);
    }

    #[test]
    fn last_page_is_partial() {
        let page = LeaderboardPage::build(&members(5), 2, 2);

        assert_eq!(page.entries, vec![(5, members(5)[0].clone())]);
        assert!(page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn out_of_range_wraps_to_first() {
        let page = LeaderboardPage::build(&members(5), 7, 2);

        assert_eq!(page.page, 0);
        assert_eq!(page.entries[0].0, 1);
    }

    #[test]
    fn body_lines() {
        let page = LeaderboardPage::build(&members(2), 0, 25);

        assert_eq!(page.body(), "**1.** user1 - `10s`\n**2.** user0 - `0s`");
    }

    #[test]
    fn button_ids_round_trip() {
        let id = button_id(1234, 3);
        let (name, args) = super::super::split_custom_id(&id);

        assert_eq!(name, BUTTON_NAME);
        assert_eq!(parse_button_args(&args), Some((1234, 3)));
        assert_eq!(parse_button_args(&["x", "1"]), None);
        assert_eq!(parse_button_args(&["1"]), None);
    }
}
