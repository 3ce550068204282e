//! Fixed response payload
//!
//! The response is rendered once at startup; serving a request clones
//! refcounted bytes and pre-validated header values, so the hot path
//! allocates nothing.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use http_body_util::Full;
use smallvec::SmallVec;

use crate::config::ServerConfig;
use crate::error::{Error, Result};

/// The one response every request receives
#[derive(Debug, Clone)]
pub struct FixedPayload {
    status: StatusCode,
    headers: SmallVec<[(HeaderName, HeaderValue); 4]>,
    body: Bytes,
}

impl FixedPayload {
    /// Create a payload with the given body and content type
    pub fn new(body: impl Into<Bytes>, content_type: &str) -> Result<Self> {
        let value = HeaderValue::from_str(content_type).map_err(|e| {
            Error::InvalidConfig(format!("content_type {content_type:?}: {e}"))
        })?;

        let mut headers = SmallVec::new();
        headers.push((CONTENT_TYPE, value));

        Ok(Self {
            status: StatusCode::OK,
            headers,
            body: body.into(),
        })
    }

    /// Build the payload described by the config
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        Self::new(config.body.clone().into_bytes(), &config.content_type)
    }

    /// Body bytes
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Byte length of the body (the declared content length)
    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    /// Render as a hyper response
    ///
    /// `Full` carries an exact size hint, so hyper emits a Content-Length
    /// equal to the body's byte length.
    pub fn to_response(&self) -> hyper::Response<Full<Bytes>> {
        let mut res = hyper::Response::new(Full::new(self.body.clone()));
        *res.status_mut() = self.status;
        for (name, value) in &self.headers {
            res.headers_mut().insert(name.clone(), value.clone());
        }
        res
    }
}
