//! Clubhouse destination backed by reqwest.

use super::{CreatedEpic, CreatedStory, Destination, DestinationError, Project};
use crate::entities::{EpicCreationRequest, LabelDescriptor, StoryCreationRequest, StoryId};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const CLUBHOUSE_BASE_URL: &str = "https://api.clubhouse.io/api/v3/";
const AUTH_HEADER: &str = "Clubhouse-Token";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Body of `POST /stories/bulk`.
#[derive(Debug, Serialize)]
struct CreateStories<'a> {
    stories: &'a [StoryCreationRequest],
}

/// Body of `PUT /stories/bulk`.
#[derive(Debug, Serialize)]
struct UpdateStories<'a> {
    story_ids: &'a [StoryId],
    labels_add: [&'a LabelDescriptor; 1],
}

/// Creates epics, stories and labels through the Clubhouse v3 REST API.
#[derive(Debug, Clone)]
pub struct ClubhouseDestination {
    http_client: reqwest::Client,
    base_url: Url,
    token: String,
}

impl ClubhouseDestination {
    /// Builds a client for the public Clubhouse API.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError::Http`] if the HTTP client cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self, DestinationError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(CLUBHOUSE_BASE_URL)?,
            token: token.into(),
        })
    }

    /// Points the client at another API root.
    ///
    /// The root is treated as a directory; a missing trailing slash is added.
    pub fn with_base_url(mut self, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        self.base_url = base_url;
        self
    }

    fn url(&self, path: &str) -> Result<Url, DestinationError> {
        Ok(self.base_url.join(path)?)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, DestinationError> {
        let response = request.header(AUTH_HEADER, &self.token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DestinationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Destination for ClubhouseDestination {
    async fn list_projects(&self) -> Result<Vec<Project>, DestinationError> {
        let url = self.url("projects")?;
        debug!(url = %url, "Listing Clubhouse projects");
        self.send(self.http_client.get(url)).await
    }

    async fn create_epic(
        &self,
        request: &EpicCreationRequest,
    ) -> Result<CreatedEpic, DestinationError> {
        let url = self.url("epics")?;
        debug!(url = %url, external_id = %request.external_id, "Creating Clubhouse epic");
        self.send(self.http_client.post(url).json(request)).await
    }

    async fn bulk_create_stories(
        &self,
        stories: &[StoryCreationRequest],
    ) -> Result<Vec<CreatedStory>, DestinationError> {
        let url = self.url("stories/bulk")?;
        debug!(url = %url, count = stories.len(), "Creating Clubhouse stories");
        self.send(self.http_client.post(url).json(&CreateStories { stories }))
            .await
    }

    async fn apply_label_to_stories(
        &self,
        label: &LabelDescriptor,
        story_ids: &[StoryId],
    ) -> Result<(), DestinationError> {
        let url = self.url("stories/bulk")?;
        debug!(
            url = %url,
            label = %label.name,
            count = story_ids.len(),
            "Labelling Clubhouse stories"
        );
        let body = UpdateStories {
            story_ids,
            labels_add: [label],
        };
        let _updated: serde_json::Value =
            self.send(self.http_client.put(url).json(&body)).await?;
        Ok(())
    }
}
