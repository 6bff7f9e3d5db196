use std::time::Duration;

use secrecy::SecretString;

use crate::{
    JenkinsError,
    JenkinsResult,
};

pub const ENV_SERVER_URL: &str = "JENKINS_URL";
pub const ENV_USERNAME: &str = "JENKINS_USER";
pub const ENV_TOKEN: &str = "JENKINS_TOKEN";
pub const ENV_PASSWORD: &str = "JENKINS_PASSWORD";
pub const ENV_TIMEOUT_SECS: &str = "JENKINS_TIMEOUT_SECS";

/// Connection settings for a [`crate::JenkinsClient`].
///
/// `password` may be an API token; Jenkins accepts either in the Basic auth
/// header. Timeouts are unset by default, so requests wait until the
/// transport answers or fails.
#[derive(Debug)]
pub struct ClientConfig {
    pub server_url: String,
    pub username: String,
    pub password: SecretString,
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            username: String::new(),
            password: SecretString::from(String::new()),
            timeout: None,
            connect_timeout: None,
        }
    }

    pub fn with_credentials(
        mut self, username: impl Into<String>, password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = SecretString::from(password.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Reads `JENKINS_URL`, `JENKINS_USER`, `JENKINS_TOKEN` (or
    /// `JENKINS_PASSWORD`) and `JENKINS_TIMEOUT_SECS` from the process
    /// environment.
    pub fn from_env() -> JenkinsResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> JenkinsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = lookup(ENV_SERVER_URL)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| JenkinsError::InvalidConfig(format!("Missing {ENV_SERVER_URL}")))?;

        let username = lookup(ENV_USERNAME).unwrap_or_default();
        let password = lookup(ENV_TOKEN)
            .or_else(|| lookup(ENV_PASSWORD))
            .unwrap_or_default();

        let mut config = Self::new(server_url).with_credentials(username, password);

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|e| {
                JenkinsError::InvalidConfig(format!("Invalid {ENV_TIMEOUT_SECS} '{raw}': {e}"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
