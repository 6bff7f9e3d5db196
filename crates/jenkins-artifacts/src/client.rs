//! Jenkins API client and methods

use std::collections::HashMap;

use base64::Engine;
use reqwest::header::AUTHORIZATION;
use reqwest::{
    Client,
    Response,
    StatusCode,
};
use secrecy::{
    ExposeSecret,
    SecretString,
};
use serde::de::DeserializeOwned;
use serde_json::{
    Map,
    Value,
};

use crate::{
    mapper,
    types,
    Artifact,
    ArtifactStream,
    ClientConfig,
    Job,
    JenkinsError,
    JenkinsResult,
};

#[derive(Debug)]
struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    fn new(username: String, password: SecretString) -> Self {
        Self { username, password }
    }

    fn authorization_header(&self) -> String {
        let auth_value = format!("{}:{}", self.username, self.password.expose_secret());
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(auth_value.as_bytes())
        )
    }
}

/// reqwest is built without a bundled crypto provider; make sure one is
/// installed before the first client is created. A provider installed by
/// the host process wins.
fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Client for a single Jenkins server.
///
/// Request methods take `&self` and may run concurrently; changing
/// credentials needs `&mut self`.
#[derive(Debug)]
pub struct JenkinsClient {
    http: Client,
    server_url: String,
    credentials: Credentials,
}

impl JenkinsClient {
    /// Creates a client with empty credentials and no request timeout.
    pub fn new(server_url: impl Into<String>) -> JenkinsResult<Self> {
        Self::from_config(ClientConfig::new(server_url))
    }

    pub fn from_config(config: ClientConfig) -> JenkinsResult<Self> {
        install_crypto_provider();

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| JenkinsError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

        let mut client = Self::with_http_client(http, config.server_url);
        client.credentials = Credentials::new(config.username, config.password);
        Ok(client)
    }

    /// Wraps an existing reqwest client, e.g. one shared with other services.
    pub fn with_http_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            server_url,
            credentials: Credentials::new(String::new(), SecretString::from(String::new())),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Replaces the credentials used by every later request. The password
    /// may be an API token.
    pub fn set_auth(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.credentials = Credentials::new(username.into(), SecretString::from(password.into()));
    }

    /// Fetches `{server}{path}/api/json` and decodes it as a JSON object.
    pub async fn fetch_json(&self, path: &str) -> JenkinsResult<Map<String, Value>> {
        self.fetch(path).await
    }

    /// Confirms the server accepts the current credentials.
    pub async fn validate_credentials(&self) -> JenkinsResult<()> {
        self.fetch_json("").await.map(|_| ())
    }

    /// Lists the jobs at the server root, keyed by name.
    pub async fn list_jobs(&self) -> JenkinsResult<HashMap<String, Job>> {
        let response: types::JobsResponse = self.fetch("").await?;
        let jobs = mapper::jobs_by_name(response);
        tracing::debug!("Found {} jobs on {}", jobs.len(), self.server_url);
        Ok(jobs)
    }

    /// Lists the artifacts of one build. `build` is a build number or an
    /// alias such as `lastSuccessfulBuild`.
    pub async fn list_artifacts(&self, job: &Job, build: &str) -> JenkinsResult<Vec<Artifact>> {
        let response: types::ArtifactsResponse = self.fetch(&build_path(job, build)).await?;
        let artifacts = mapper::artifacts_in_order(response);
        tracing::debug!(
            "Found {} artifacts for {} build {}",
            artifacts.len(),
            job.name,
            build
        );
        Ok(artifacts)
    }

    /// Opens the raw bytes of an artifact. The returned stream owns the
    /// connection until it is read out or dropped.
    ///
    /// Only 401 and 404 are errors; any other status hands back the body and
    /// callers can inspect [`ArtifactStream::status`].
    pub async fn download_artifact(
        &self, job: &Job, build: &str, artifact: &Artifact,
    ) -> JenkinsResult<ArtifactStream> {
        let url = format!(
            "{}{}/artifact/{}",
            self.server_url,
            build_path(job, build),
            artifact.relative_path
        );

        let response = self.get(&url).await?;
        let status = response.status();

        match status {
            StatusCode::UNAUTHORIZED => {
                tracing::warn!("Download of {url} rejected: {status}");
                Err(JenkinsError::AuthenticationFailed(status.to_string()))
            }
            StatusCode::NOT_FOUND => Err(JenkinsError::NotFound(status.to_string())),
            _ => {
                if !status.is_success() {
                    tracing::warn!("Download of {url} answered {status}");
                }
                Ok(ArtifactStream::new(url, response))
            }
        }
    }

    async fn fetch<T>(&self, path: &str) -> JenkinsResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}/api/json", self.server_url, path);

        let response = self.get(&url).await?;
        let status = response.status();

        // Jenkins answers 401 with an HTML page, so check before decoding.
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Request to {url} rejected: {status}");
            return Err(JenkinsError::AuthenticationFailed(status.to_string()));
        }
        if !status.is_success() {
            tracing::warn!("Request to {url} failed: {status}");
            return Err(JenkinsError::ServerError {
                url,
                status: status.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| JenkinsError::ParseError { url, source })
    }

    async fn get(&self, url: &str) -> JenkinsResult<Response> {
        tracing::debug!("GET {url}");

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.credentials.authorization_header())
            .send()
            .await?;

        Ok(response)
    }
}

fn build_path(job: &Job, build: &str) -> String {
    format!("/job/{}/{}", job.name, build)
}
