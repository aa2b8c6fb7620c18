//! ZenHub board overlay backed by reqwest.

use super::epic::EpicResponse;
use super::{BoardEpic, BoardError, BoardOverlay};
use crate::entities::IssueNumber;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

const ZENHUB_BASE_URL: &str = "https://api.zenhub.com/";
const AUTH_HEADER: &str = "X-Authentication-Token";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Reads epics from the ZenHub REST API.
#[derive(Debug, Clone)]
pub struct ZenHubBoard {
    http_client: reqwest::Client,
    base_url: Url,
    token: String,
}

impl ZenHubBoard {
    /// Builds a client for the public ZenHub API.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Http`] if the HTTP client cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self, BoardError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(ZENHUB_BASE_URL)?,
            token: token.into(),
        })
    }

    /// Points the client at another host (e.g. ZenHub Enterprise).
    ///
    /// The base is treated as a directory; a missing trailing slash is added.
    pub fn with_base_url(mut self, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        self.base_url = base_url;
        self
    }

    fn epic_url(&self, repo_id: u64, number: IssueNumber) -> Result<Url, BoardError> {
        Ok(self
            .base_url
            .join(&format!("p1/repositories/{repo_id}/epics/{number}"))?)
    }
}

#[async_trait]
impl BoardOverlay for ZenHubBoard {
    async fn fetch_epic(&self, repo_id: u64, number: IssueNumber) -> Result<BoardEpic, BoardError> {
        let url = self.epic_url(repo_id, number)?;
        debug!(url = %url, "Fetching ZenHub epic");

        let response = self
            .http_client
            .get(url)
            .header(AUTH_HEADER, &self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BoardError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let epic: EpicResponse = response.json().await?;
        Ok(epic.into_epic())
    }
}
