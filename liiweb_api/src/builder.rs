//! Configuration for [`Client`].

use std::time::Duration;

use crate::{Client, Error};

/// Whole-request timeout used unless the caller picks another.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent unless the caller picks another.
pub const DEFAULT_USER_AGENT: &str = concat!("liiweb-client/", env!("CARGO_PKG_VERSION"));

/// Builder for a [`Client`] with non-default transport settings.
///
/// ```no_run
/// # async fn run() -> Result<(), liiweb_api::Error> {
/// use std::time::Duration;
///
/// let client = liiweb_api::Client::builder("https://lii.example.org", "api", "secret")
///     .timeout(Duration::from_secs(120))
///     .build()?;
/// let acts = client.list_legislation("za").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    username: String,
    password: String,
    timeout: Duration,
    user_agent: String,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http: None,
        }
    }

    /// Sets the whole-request timeout. Ignored when [`http_client`](Self::http_client) is used.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent. Ignored when [`http_client`](Self::http_client) is used.
    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Uses a caller-configured transport (proxies, custom TLS roots, etc).
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Builds the client. Fails only if the TLS backend cannot be initialised.
    pub fn build(self) -> Result<Client, Error> {
        let http = match self.http {
            Some(http) => http,
            None => http_client(self.timeout, &self.user_agent).map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Transport(e)
            })?,
        };
        Ok(Client::from_parts(
            http,
            self.base_url,
            self.username,
            self.password,
        ))
    }
}

pub(crate) fn http_client(
    timeout: Duration,
    user_agent: &str,
) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let builder = ClientBuilder::new("https://lii.example.org", "user", "pass");
        assert_eq!(builder.timeout, DEFAULT_TIMEOUT);
        assert!(builder.user_agent.starts_with("liiweb-client/"));
        assert!(builder.http.is_none());
    }

    #[test]
    fn build_keeps_connection_parameters() {
        let client = ClientBuilder::new("https://lii.example.org", "user", "pass")
            .timeout(Duration::from_secs(5))
            .user_agent("tests")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://lii.example.org");
        assert_eq!(client.username(), "user");
        assert_eq!(client.password(), "pass");
    }
}
