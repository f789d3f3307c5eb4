use std::{borrow::Cow, time::Duration};

use reqwest::{
    header::{HeaderMap, CONTENT_TYPE},
    StatusCode,
};
use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// Everything the service sent back, whatever the status.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status:  StatusCode,
    headers: HeaderMap,
    body:    Vec<u8>,
    elapsed: Duration,
}

impl ApiResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>, elapsed: Duration) -> Self {
        Self {
            status,
            headers,
            body,
            elapsed,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The raw `Content-Type` header, or `""` when absent.
    pub fn content_type(&self) -> &str {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    /// Substring match, so parameters like `; charset=utf-8` don't matter.
    pub fn has_content_type(&self, expected: &str) -> bool {
        self.content_type().contains(expected)
    }

    /// Time from sending the request to having read the whole body.
    pub fn time(&self) -> Duration {
        self.elapsed
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        let de = &mut serde_json::Deserializer::from_slice(&self.body);
        serde_path_to_error::deserialize(de).map_err(|e| Error::Decode {
            target:  std::any::type_name::<T>(),
            path:    e.path().to_string(),
            message: e.into_inner().to_string(),
        })
    }
}
