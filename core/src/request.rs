//! An outgoing HTTP request: URL, method, headers and parameters.
//!
//! # Design
//! Setters validate eagerly and return `Result<&mut Self, HttpError>` so
//! calls chain with `?`. Lookups of absent headers or parameters return
//! `None`. Bulk setters check every entry before touching state, so a
//! rejected batch leaves the request as it was.

use serde_json::Value;

use crate::error::HttpError;
use crate::http::Method;
use crate::key_value::KeyValue;
use crate::url::{Parameters, Url};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    url: Url,
    method: Option<Method>,
    headers: KeyValue,
    parameters: Parameters,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from `base_url`. Unparseable input leaves the URL empty.
    pub fn with_url(base_url: &str) -> Self {
        Self {
            url: Url::from(base_url),
            ..Self::default()
        }
    }

    pub fn valid_methods() -> &'static [Method] {
        &Method::ALL
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    /// Replace the URL. Returns `false` if `url` could not be parsed.
    pub fn set_url(&mut self, url: &str) -> bool {
        self.url.set_url(url)
    }

    pub fn method(&self) -> Option<Method> {
        self.method
    }

    pub fn set_method(&mut self, method: impl AsRef<str>) -> Result<&mut Self, HttpError> {
        self.method = Some(method.as_ref().parse()?);
        Ok(self)
    }

    pub fn headers(&self) -> &KeyValue {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn set_header(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, HttpError> {
        let (name, value) = (name.into(), value.into());
        validate_header(&name, &value)?;
        self.headers.set(name, value);
        Ok(self)
    }

    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        self.headers.remove(name)
    }

    /// Replace all headers.
    pub fn set_headers<I, K, V>(&mut self, headers: I) -> Result<&mut Self, HttpError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let headers: KeyValue = headers
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        for (name, value) in &headers {
            validate_header(name, value)?;
        }
        self.headers = headers;
        Ok(self)
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.has(name)
    }

    /// Parameters must be strings or numbers.
    pub fn set_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, HttpError> {
        let (name, value) = (name.into(), value.into());
        validate_parameter(&name, &value)?;
        self.parameters.set(name, value);
        Ok(self)
    }

    /// Replace all parameters; `None` clears them.
    pub fn set_parameters(
        &mut self,
        parameters: Option<&Parameters>,
    ) -> Result<&mut Self, HttpError> {
        match parameters {
            Some(parameters) => {
                for (name, value) in parameters {
                    validate_parameter(name, value)?;
                }
                self.parameters = parameters.clone();
            }
            None => self.parameters.clear(),
        }
        Ok(self)
    }
}

fn validate_header(name: &str, value: &str) -> Result<(), HttpError> {
    let invalid = |reason| HttpError::InvalidHeader {
        name: name.to_string(),
        reason,
    };
    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if !name.bytes().all(|b| b.is_ascii_graphic() && b != b':') {
        return Err(invalid("name contains a separator or non-visible character"));
    }
    if value.bytes().any(|b| matches!(b, b'\r' | b'\n' | b'\0')) {
        return Err(invalid("value contains a line break"));
    }
    Ok(())
}

fn validate_parameter(name: &str, value: &Value) -> Result<(), HttpError> {
    if value.is_string() || value.is_number() {
        Ok(())
    } else {
        Err(HttpError::InvalidParameter {
            name: name.to_string(),
            reason: "value must be a string or a number",
        })
    }
}
