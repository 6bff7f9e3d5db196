//! Minimal client for the Jenkins REST API
//!
//! Lists the jobs of a server, lists the artifacts of a build, and streams
//! artifact bytes. Every call is a single authenticated GET; failures come
//! back as [`JenkinsError`] values.
//!
//! # Modules
//!
//! - `client` - the [`JenkinsClient`] and its requests
//! - `stream` - [`ArtifactStream`], the body of a download
//! - `types` - [`Job`], [`Artifact`] and the API response shapes
//! - `mapper` - response to value conversion
//! - `config` - [`ClientConfig`]
//!
//! # Example Usage
//!
//! ```no_run
//! use jenkins_artifacts::JenkinsClient;
//!
//! # async fn run() -> jenkins_artifacts::JenkinsResult<()> {
//! let mut client = JenkinsClient::new("https://jenkins.example.com")?;
//! client.set_auth("builder", "api-token");
//!
//! let jobs = client.list_jobs().await?;
//! if let Some(job) = jobs.get("app") {
//!     for artifact in client.list_artifacts(job, "lastSuccessfulBuild").await? {
//!         let mut file = tokio::fs::File::create(&artifact.file_name).await?;
//!         client
//!             .download_artifact(job, "lastSuccessfulBuild", &artifact)
//!             .await?
//!             .copy_to(&mut file)
//!             .await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod mapper;
mod stream;
mod types;

pub use client::JenkinsClient;
pub use config::{
    ClientConfig,
    ENV_PASSWORD,
    ENV_SERVER_URL,
    ENV_TIMEOUT_SECS,
    ENV_TOKEN,
    ENV_USERNAME,
};
pub use error::{
    JenkinsError,
    JenkinsResult,
};
pub use stream::ArtifactStream;
pub use types::{
    Artifact,
    Job,
};
