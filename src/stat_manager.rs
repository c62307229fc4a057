use std::sync::Arc;

use chrono::Duration;
use tokio::sync::Mutex;

use crate::cache::{get_or_refresh, Cache, Clock};
use crate::error::Result;
use crate::model::{ActivityQuery, ActivityRecord, LeaderboardMember};
use crate::testaustime::Testaustime;

/// What the activity service knows about the bot's own account.
#[derive(Debug, Clone, Default)]
pub struct BotIdentity {
    pub username: String,
    pub friend_code: String,
    pub leaderboard_invite: String,
}

pub struct StatManager {
    api: Testaustime,
    leaderboard_name: String,
    identity: BotIdentity,
    friends: Mutex<Cache<(), Arc<Vec<String>>>>,
    activities: Mutex<Cache<String, Arc<Vec<ActivityRecord>>>>,
    leaderboard: Mutex<Cache<(), Arc<Vec<LeaderboardMember>>>>,
}

impl StatManager {
    pub fn new(
        api: Testaustime,
        leaderboard_name: impl Into<String>,
        identity: BotIdentity,
        refresh_interval: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            api,
            leaderboard_name: leaderboard_name.into(),
            identity,
            friends: Mutex::new(Cache::new(refresh_interval, clock.clone())),
            activities: Mutex::new(Cache::new(refresh_interval, clock.clone())),
            leaderboard: Mutex::new(Cache::new(refresh_interval, clock)),
        }
    }

    /// Looks up the bot account and the tracked leaderboard's invite code.
    pub async fn connect(
        api: Testaustime,
        leaderboard_name: &str,
        refresh_interval: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let me = api.get_me().await?;
        let board = api.get_leaderboard(leaderboard_name).await?;

        let identity = BotIdentity {
            username: me.username,
            friend_code: me.friend_code,
            leaderboard_invite: board.invite,
        };

        tracing::info!(bot = %identity.username, leaderboard = leaderboard_name, "stat manager ready");

        Ok(Self::new(api, leaderboard_name, identity, refresh_interval, clock))
    }

    pub fn identity(&self) -> &BotIdentity {
        &self.identity
    }

    /// Usernames that allow the bot to read their data, sorted.
    pub async fn friends(&self) -> Result<Arc<Vec<String>>> {
        get_or_refresh(&self.friends, (), move || async move {
            let mut names: Vec<String> = self
                .api
                .list_friends()
                .await?
                .into_iter()
                .map(|f| f.username)
                .collect();
            names.sort();

            Ok(Arc::new(names))
        })
        .await
    }

    pub async fn activity(&self, user: &str) -> Result<Arc<Vec<ActivityRecord>>> {
        get_or_refresh(&self.activities, user.to_owned(), move || async move {
            let query = ActivityQuery {
                min_duration: Some(1),
                ..ActivityQuery::default()
            };

            Ok(Arc::new(self.api.get_activity(Some(user), &query).await?))
        })
        .await
    }

    /// Leaderboard members without the bot's own account.
    pub async fn leaderboard(&self) -> Result<Arc<Vec<LeaderboardMember>>> {
        get_or_refresh(&self.leaderboard, (), move || async move {
            let board = self.api.get_leaderboard(&self.leaderboard_name).await?;
            let members = without_user(board.members, &self.identity.username);

            Ok(Arc::new(members))
        })
        .await
    }
}

fn without_user(members: Vec<LeaderboardMember>, username: &str) -> Vec<LeaderboardMember> {
    members
        .into_iter()
        .filter(|m| m.username != username)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SystemClock;

    fn member(name: &str, time: i64) -> LeaderboardMember {
        LeaderboardMember {
            username: name.to_string(),
            time_coded: time,
        }
    }

    #[test]
    fn bot_is_removed_from_leaderboard() {
        let members = vec![member("alice", 10), member("statbot", 0), member("bob", 5)];

        let kept = without_user(members, "statbot");

        assert_eq!(kept, vec![member("alice", 10), member("bob", 5)]);
    }

    #[tokio::test]
    async fn cached_activity_skips_the_network() {
        let api = Testaustime::new(Some("http://127.0.0.1:9/")).unwrap();
        let manager = StatManager::new(
            api,
            "general",
            BotIdentity::default(),
            Duration::seconds(60),
            Arc::new(SystemClock),
        );
        let records = Arc::new(vec![]);

        manager
            .activities
            .lock()
            .await
            .insert("alice".to_string(), records.clone());

        let fetched = manager.activity("alice").await.unwrap();
        assert!(Arc::ptr_eq(&fetched, &records));
    }
}
