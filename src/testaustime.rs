//! Client for the Testaustime REST API.

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{ActivityQuery, ActivityRecord, Friend, Leaderboard, SelfUser};

pub const DEFAULT_HOST: &str = "https://api.testaustime.fi/";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    auth_token: String,
}

pub struct Testaustime {
    http_client: reqwest::Client,
    host: Url,
    token: String,
}

impl Testaustime {
    /// A client for `host`, or the public server when `None`.
    pub fn new(host: Option<&str>) -> Result<Self> {
        let raw = host.unwrap_or(DEFAULT_HOST);
        let mut host = Url::parse(raw)
            .map_err(|e| Error::Config(format!("invalid api host {:?}: {}", raw, e)))?;

        if !host.path().ends_with('/') {
            let path = format!("{}/", host.path());
            host.set_path(&path);
        }

        Ok(Self {
            http_client: reqwest::Client::new(),
            host,
            token: String::new(),
        })
    }

    /// Appends each segment to the host path, percent-encoding as needed.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.host.clone();

        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("api host {} cannot be a base", self.host)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self
            .http_client
            .request(method, self.url(segments)?)
            .bearer_auth(&self.token))
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        Ok(response.json().await?)
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let response = self
            .http_client
            .post(self.url(&["auth", "login"])?)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        let login: LoginResponse = Self::json(response).await?;
        self.token = login.auth_token;

        tracing::info!(user = username, "logged in to testaustime");
        Ok(())
    }

    pub async fn get_me(&self) -> Result<SelfUser> {
        let response = self.request(Method::GET, &["users", "@me"])?.send().await?;
        Self::json(response).await
    }

    pub async fn list_friends(&self) -> Result<Vec<Friend>> {
        let response = self.request(Method::GET, &["friends", "list"])?.send().await?;
        Self::json(response).await
    }

    pub async fn get_leaderboard(&self, name: &str) -> Result<Leaderboard> {
        let response = self
            .request(Method::GET, &["leaderboards", name])?
            .send()
            .await?;
        Self::json(response).await
    }

    /// Activity of `user`, who has to be the bot itself or one of its friends.
    pub async fn get_activity(
        &self,
        user: Option<&str>,
        query: &ActivityQuery,
    ) -> Result<Vec<ActivityRecord>> {
        let user = user.unwrap_or("@me");
        let response = self
            .request(Method::GET, &["users", user, "activity", "data"])?
            .query(query)
            .send()
            .await?;

        let records: Vec<ActivityRecord> = Self::json(response).await?;
        tracing::debug!(user, count = records.len(), "fetched activity");

        Ok(records)
    }
}
