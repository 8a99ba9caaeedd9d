//! HTTP transport implemented with curl.

use crate::client::Transport;
pub use curl;
use curl::easy::{Easy, List};
use std::{
    cell::RefCell,
    env,
    io::{Read, Write},
    string::FromUtf8Error,
};
use thiserror::Error;

/// A blocking HTTP transport backed by a curl handle.
///
/// The handle is reused between requests, so a single transport is not
/// meant to be shared across threads.
pub struct Curl {
    handle: RefCell<Easy>,
}

impl Curl {
    /// Creates a new transport for the specified node URL.
    pub fn new(url: impl AsRef<str>) -> Result<Self, Error> {
        let mut handle = Easy::new();
        handle.url(url.as_ref())?;
        handle.post(true)?;
        handle.http_headers({
            let mut list = List::new();
            list.append("Content-Type: application/json")?;
            list
        })?;
        Ok(Self::with_handle(handle))
    }

    /// Creates a new transport for the specified curl [`Easy`] handle.
    ///
    /// This method assumes that the `url` has been set and that the handle is
    /// configured for `POST` requests.
    pub fn with_handle(handle: Easy) -> Self {
        Self {
            handle: RefCell::new(handle),
        }
    }

    /// Creates a new transport from the node URL in the `ETHRPC` environment
    /// variable. This is useful for testing.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(env::var("ETHRPC")?)
    }
}

impl Transport for Curl {
    type Error = Error;

    fn roundtrip(&self, request: String) -> Result<String, Error> {
        let mut handle = self.handle.try_borrow_mut().map_err(|_| Error::Busy)?;

        let mut request = request.as_bytes();
        let mut response = Vec::new();
        handle.post_field_size(request.len() as u64)?;
        {
            let mut transfer = handle.transfer();
            transfer.read_function(|chunk| Ok(request.read(chunk).unwrap_or(0)))?;
            transfer.write_function(|chunk| {
                response.extend_from_slice(chunk);
                Ok(chunk.len())
            })?;
            transfer.perform()?;
        }

        let status = handle.response_code()?;
        let response = String::from_utf8(response)?;
        tracing::debug!(status, "node responded");
        if !(200..300).contains(&status) {
            return Err(Error::Status(status, response));
        }

        Ok(response)
    }
}

/// A curl transport error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing ETHRPC environment variable: {0}")]
    Env(#[from] env::VarError),
    #[error("HTTP error: {0}")]
    Http(#[from] curl::Error),
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] FromUtf8Error),
    #[error("HTTP {0} error: {1}")]
    Status(u32, String),
    #[error("curl handle is already in use")]
    Busy,
}
