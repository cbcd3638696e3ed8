// ABOUTME: HTTP client for the taxonomy REST API
// ABOUTME: The TaxonomyApi trait is the seam the controller is tested through

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::debug;

use atelier_taxonomy::{ProjectType, ProjectTypeInput, TagInput, TagType, TagTypeInput};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// HTTP status of a server-side failure
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(err) => err.status().map(|s| s.as_u16()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// The taxonomy REST surface. `scope` is the owning project type id; `None`
/// addresses the global tag types.
#[async_trait]
pub trait TaxonomyApi: Send + Sync {
    async fn list_project_types(&self) -> ClientResult<Vec<ProjectType>>;

    async fn create_project_type(&self, input: ProjectTypeInput) -> ClientResult<ProjectType>;

    async fn update_project_type(
        &self,
        project_type_id: &str,
        input: ProjectTypeInput,
    ) -> ClientResult<ProjectType>;

    async fn delete_project_type(&self, project_type_id: &str) -> ClientResult<()>;

    async fn list_tag_types(&self, scope: Option<String>) -> ClientResult<Vec<TagType>>;

    async fn create_tag_type(
        &self,
        scope: Option<String>,
        input: TagTypeInput,
    ) -> ClientResult<TagType>;

    async fn update_tag_type(
        &self,
        scope: Option<String>,
        tag_type_id: &str,
        input: TagTypeInput,
    ) -> ClientResult<TagType>;

    async fn delete_tag_type(&self, scope: Option<String>, tag_type_id: &str) -> ClientResult<()>;

    /// Returns the parent tag type with its refreshed tag list
    async fn create_tag(
        &self,
        scope: Option<String>,
        tag_type_id: &str,
        input: TagInput,
    ) -> ClientResult<TagType>;

    async fn update_tag(
        &self,
        scope: Option<String>,
        tag_type_id: &str,
        tag_id: &str,
        input: TagInput,
    ) -> ClientResult<TagType>;

    async fn delete_tag(
        &self,
        scope: Option<String>,
        tag_type_id: &str,
        tag_id: &str,
    ) -> ClientResult<TagType>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct DeleteBody {
    success: bool,
}

impl DeleteBody {
    fn into_result(self) -> ClientResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(ClientError::Api {
                status: 500,
                message: "Server did not confirm the delete".to_string(),
            })
        }
    }
}

/// reqwest-backed implementation talking to a running Atelier server
pub struct HttpTaxonomyClient {
    client: Client,
    base_url: String,
}

impl HttpTaxonomyClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check server health
    pub async fn health_check(&self) -> ClientResult<bool> {
        let response = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?;

        Ok(response.status().is_success())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn tag_types_path(scope: Option<&str>) -> String {
        match scope {
            Some(project_type_id) => format!("/project-types/{}/tag-types", project_type_id),
            None => "/tag-types".to_string(),
        }
    }

    fn tag_type_path(scope: Option<&str>, tag_type_id: &str) -> String {
        format!("{}/{}", Self::tag_types_path(scope), tag_type_id)
    }

    fn tag_path(scope: Option<&str>, tag_type_id: &str, tag_id: &str) -> String {
        format!("{}/tags/{}", Self::tag_type_path(scope, tag_type_id), tag_id)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };
        debug!(status = status.as_u16(), error = %message, "Taxonomy API returned an error");

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl TaxonomyApi for HttpTaxonomyClient {
    async fn list_project_types(&self) -> ClientResult<Vec<ProjectType>> {
        self.send(self.client.get(self.url("/project-types"))).await
    }

    async fn create_project_type(&self, input: ProjectTypeInput) -> ClientResult<ProjectType> {
        self.send(self.client.post(self.url("/project-types")).json(&input))
            .await
    }

    async fn update_project_type(
        &self,
        project_type_id: &str,
        input: ProjectTypeInput,
    ) -> ClientResult<ProjectType> {
        let path = format!("/project-types/{}", project_type_id);
        self.send(self.client.put(self.url(&path)).json(&input)).await
    }

    async fn delete_project_type(&self, project_type_id: &str) -> ClientResult<()> {
        let path = format!("/project-types/{}", project_type_id);
        self.send::<DeleteBody>(self.client.delete(self.url(&path)))
            .await?
            .into_result()
    }

    async fn list_tag_types(&self, scope: Option<String>) -> ClientResult<Vec<TagType>> {
        let path = Self::tag_types_path(scope.as_deref());
        self.send(self.client.get(self.url(&path))).await
    }

    async fn create_tag_type(
        &self,
        scope: Option<String>,
        input: TagTypeInput,
    ) -> ClientResult<TagType> {
        let path = Self::tag_types_path(scope.as_deref());
        self.send(self.client.post(self.url(&path)).json(&input)).await
    }

    async fn update_tag_type(
        &self,
        scope: Option<String>,
        tag_type_id: &str,
        input: TagTypeInput,
    ) -> ClientResult<TagType> {
        let path = Self::tag_type_path(scope.as_deref(), tag_type_id);
        self.send(self.client.put(self.url(&path)).json(&input)).await
    }

    async fn delete_tag_type(&self, scope: Option<String>, tag_type_id: &str) -> ClientResult<()> {
        let path = Self::tag_type_path(scope.as_deref(), tag_type_id);
        self.send::<DeleteBody>(self.client.delete(self.url(&path)))
            .await?
            .into_result()
    }

    async fn create_tag(
        &self,
        scope: Option<String>,
        tag_type_id: &str,
        input: TagInput,
    ) -> ClientResult<TagType> {
        let path = format!("{}/tags", Self::tag_type_path(scope.as_deref(), tag_type_id));
        self.send(self.client.post(self.url(&path)).json(&input)).await
    }

    async fn update_tag(
        &self,
        scope: Option<String>,
        tag_type_id: &str,
        tag_id: &str,
        input: TagInput,
    ) -> ClientResult<TagType> {
        let path = Self::tag_path(scope.as_deref(), tag_type_id, tag_id);
        self.send(self.client.put(self.url(&path)).json(&input)).await
    }

    async fn delete_tag(
        &self,
        scope: Option<String>,
        tag_type_id: &str,
        tag_id: &str,
    ) -> ClientResult<TagType> {
        let path = Self::tag_path(scope.as_deref(), tag_type_id, tag_id);
        self.send(self.client.delete(self.url(&path))).await
    }
}
