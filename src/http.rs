//! HTTP transport implemented with the blocking `reqwest` client.

use crate::client::Transport;
use reqwest::{
    blocking,
    header::{HeaderValue, CONTENT_TYPE},
    StatusCode, Url,
};
use std::env;
use thiserror::Error;

/// A blocking HTTP transport.
pub struct Http {
    client: blocking::Client,
    url: Url,
}

impl Http {
    /// Creates a new transport for the specified node URL with the default
    /// HTTP client.
    pub fn new(url: Url) -> Self {
        Self::with_client(blocking::Client::new(), url)
    }

    /// Creates a new transport for the specified client instance and URL.
    ///
    /// Use this to configure timeouts and other connection settings.
    pub fn with_client(client: blocking::Client, url: Url) -> Self {
        Self { client, url }
    }

    /// Creates a new transport from the node URL in the `ETHRPC` environment
    /// variable. This is useful for testing.
    pub fn from_env() -> Result<Self, Error> {
        let url = env::var("ETHRPC")?;
        let url = url.parse().map_err(|err| Error::Url(format!("{url}: {err}")))?;
        Ok(Self::new(url))
    }

    /// Returns the node URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Transport for Http {
    type Error = Error;

    fn roundtrip(&self, request: String) -> Result<String, Error> {
        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(request)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        tracing::debug!(%status, "node responded");

        if !status.is_success() {
            return Err(Error::Status(status, body));
        }
        Ok(body)
    }
}

/// An HTTP transport error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing ETHRPC environment variable: {0}")]
    Env(#[from] env::VarError),
    #[error("invalid node URL {0}")]
    Url(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}: {1}")]
    Status(StatusCode, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::{self, Client},
        eth,
        types::{BlockParam, Hydrated},
        web3,
    };

    #[test]
    #[ignore]
    fn connect_to_node() {
        let client = Client::new(Http::from_env().unwrap());
        let version = client.exec(web3::ClientVersion).unwrap();
        println!("client version: {version}");

        let block = client
            .call(eth::GetBlockByNumber, (BlockParam::default(), Hydrated::No))
            .unwrap();
        assert!(block.is_some());
    }

    #[test]
    fn connection_errors() {
        let client = Client::new(Http::new("http://127.0.0.1:9".parse().unwrap()));
        assert!(matches!(
            client.exec(web3::ClientVersion),
            Err(client::Error::Transport(_)),
        ));
    }
}
