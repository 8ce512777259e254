//! GitHub repository fetch -- paginated listing of a user's repositories.
//!
//! Unauthenticated requests work (with GitHub's lower rate limit); a
//! `GITHUB_TOKEN` environment variable is picked up automatically and
//! sent as a bearer token. Failures are fatal to the run: a non-success
//! status or transport error propagates, nothing is retried.

use reqwest::Client;
use serde::Deserialize;

use crate::error::FetchError;

const USER_AGENT: &str = "readmeup";
const PER_PAGE: u32 = 100;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// The slice of a repository the statistics care about.
#[derive(Debug, Clone, Deserialize)]
pub struct Repo {
    pub name: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub fork: bool,
}

/// GitHub REST client with an injectable base URL (tests point it at a
/// local mock server).
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Client against the public API, token taken from `GITHUB_TOKEN`
    /// when set.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
            token: std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Fetch every non-fork repository of `user`, following pagination
    /// until an empty page comes back.
    pub async fn fetch_repos(&self, user: &str) -> Result<Vec<Repo>, FetchError> {
        let url = format!("{}/users/{}/repos", self.base_url, user);
        let mut repos = Vec::new();
        let mut page = 1u32;

        loop {
            let mut request = self
                .client
                .get(&url)
                .query(&[
                    ("per_page", PER_PAGE.to_string()),
                    ("page", page.to_string()),
                    ("sort", "updated".to_string()),
                ])
                .header("User-Agent", USER_AGENT)
                .header("Accept", "application/vnd.github+json");
            if let Some(token) = &self.token {
                request = request.header("Authorization", format!("Bearer {token}"));
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(FetchError::Status {
                    status: response.status().as_u16(),
                    url,
                });
            }

            let batch: Vec<Repo> = response.json().await?;
            if batch.is_empty() {
                break;
            }
            repos.extend(batch.into_iter().filter(|r| !r.fork));
            page += 1;
        }

        Ok(repos)
    }
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}
