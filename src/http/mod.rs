pub mod response;

use reqwest::Client;
use response::{AsyncFrom, Inner, Response};
use serde::de::DeserializeOwned;
use std::ops::{Deref, DerefMut};
use thiserror::Error;

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Self {
        HttpClient {
            client: Client::new(),
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for HttpClient {
    type Target = Client;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl DerefMut for HttpClient {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.client
    }
}

/// Turns the outcome of `RequestBuilder::send` into a typed payload.
pub trait ResponseHandler {
    async fn handle<T: DeserializeOwned>(self) -> Result<Inner<T>, Error>;
}

impl ResponseHandler for reqwest::Result<reqwest::Response> {
    async fn handle<T: DeserializeOwned>(self) -> Result<Inner<T>, Error> {
        match self {
            Ok(response) => Response::<T>::async_from(response).await.collect(),
            Err(cause) => Err(Error::RequestError { cause }),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unexpected status {status}: {message}")]
    GenericResponseError { status: u16, message: String },
    #[error("Failed to send request")]
    RequestError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to read response text")]
    ReadResponseTextError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to parse response")]
    ParseResponseError {
        #[source]
        cause: serde_json::Error,
    },
    #[error("Refusing to follow {url} outside of {base}")]
    ForeignLinkError { url: String, base: String },
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::GenericResponseError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
