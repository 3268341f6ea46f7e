//! REST transport
//!
//! Requests are described as plain values and handed to a [`SendRequest`] implementation, so the
//! adapters on top can be exercised without a network.

use fitlog_domain::StorageError;
use log::debug;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl Request {
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            query: vec![],
            bearer: None,
            body: None,
        }
    }

    #[must_use]
    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            query: vec![],
            bearer: None,
            body: Some(body),
        }
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    #[must_use]
    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.map(str::to_string);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn error_for_status(self) -> Result<Self, StorageError> {
        match self.status {
            200..=299 => Ok(self),
            401 | 403 => Err(StorageError::Unauthorized),
            status => Err(StorageError::Other(
                format!("{status} {}", self.body.trim()).into(),
            )),
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, StorageError> {
        serde_json::from_str(&self.body)
            .map_err(|err| StorageError::Other(format!("deserialization failed: {err}").into()))
    }
}

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, StorageError>;
}

/// Sends the request and deserializes the body of a successful response.
pub async fn fetch<T, S>(sender: &S, request: Request) -> Result<T, StorageError>
where
    T: DeserializeOwned,
    S: SendRequest,
{
    sender.send_request(request).await?.error_for_status()?.json()
}

#[derive(Clone, Default)]
pub struct ReqwestSendRequest {
    client: reqwest::Client,
}

impl ReqwestSendRequest {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl SendRequest for ReqwestSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, StorageError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref token) = request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            debug!("failed to send request to {}: {err}", request.url);
            StorageError::NoConnection
        })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| StorageError::Other(err.into()))?;

        Ok(Response { status, body })
    }
}
