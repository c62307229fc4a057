use crate::stat_manager::BotIdentity;

pub const FRONTEND: &str = "https://testaustime.fi";
pub const MESSAGE: &str = "Use these buttons to allow me to use your Testaustime data";

pub fn leaderboard_url(identity: &BotIdentity) -> String {
    format!("{}/leaderboards?code=ttlic_{}", FRONTEND, identity.leaderboard_invite)
}

pub fn friend_url(identity: &BotIdentity) -> String {
    format!("{}/friends?code=ttfc_{}", FRONTEND, identity.friend_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_links() {
        let identity = BotIdentity {
            username: "statbot".to_string(),
            friend_code: "abc".to_string(),
            leaderboard_invite: "xyz".to_string(),
        };

        assert_eq!(
            leaderboard_url(&identity),
            "https://testaustime.fi/leaderboards?code=ttlic_xyz"
        );
        assert_eq!(friend_url(&identity), "https://testaustime.fi/friends?code=ttfc_abc");
    }
}
