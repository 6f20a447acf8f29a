//! The structured result of sending a `Request`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::HttpError;
use crate::key_value::KeyValue;
use crate::request::Request;

/// Status, headers and body of one HTTP exchange.
///
/// `success` is derived from the status and is true only for 2xx. A
/// response built after a transport failure has no status, no body, and
/// carries the failure text in `transport_error`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    request: Option<Request>,
    http_status: Option<u16>,
    success: bool,
    headers: KeyValue,
    body: Option<String>,
    transport_error: Option<String>,
}

impl Response {
    /// A response for `request` with `status` applied as `set_http_status`
    /// would.
    pub fn new(status: Option<i64>, request: Option<Request>) -> Result<Self, HttpError> {
        let mut response = Self {
            request,
            ..Self::default()
        };
        response.set_http_status(status)?;
        Ok(response)
    }

    /// A degraded response standing in for a round-trip that never completed.
    pub fn failed(request: Option<Request>, error: impl Into<String>) -> Self {
        Self {
            request,
            transport_error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    /// Set or clear the status. Zero, negative and out-of-range values
    /// are rejected and leave the response unchanged.
    pub fn set_http_status(&mut self, status: Option<i64>) -> Result<&mut Self, HttpError> {
        match status {
            Some(value) => {
                let code = u16::try_from(value)
                    .ok()
                    .filter(|code| *code > 0)
                    .ok_or(HttpError::InvalidStatus(value))?;
                self.http_status = Some(code);
                self.success = (200..300).contains(&code);
            }
            None => {
                self.http_status = None;
                self.success = false;
            }
        }
        Ok(self)
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn headers(&self) -> &KeyValue {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// `None` resets to an empty container.
    pub fn set_headers(&mut self, headers: Option<KeyValue>) -> &mut Self {
        self.headers = headers.unwrap_or_default();
        self
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = Some(body.into());
        self
    }

    pub fn request(&self) -> Option<&Request> {
        self.request.as_ref()
    }

    pub fn set_request(&mut self, request: Option<Request>) -> &mut Self {
        self.request = request;
        self
    }

    pub fn transport_error(&self) -> Option<&str> {
        self.transport_error.as_deref()
    }

    /// Decode the body as untyped JSON; `None` if there is no body or it is
    /// not valid JSON.
    pub fn to_json(&self) -> Option<Value> {
        serde_json::from_str(self.body.as_deref()?).ok()
    }

    /// Decode the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        let body = self
            .body
            .as_deref()
            .ok_or_else(|| HttpError::Deserialization("response has no body".to_string()))?;
        serde_json::from_str(body).map_err(|e| HttpError::Deserialization(e.to_string()))
    }
}
