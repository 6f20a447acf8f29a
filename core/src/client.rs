//! Method-level HTTP client and raw-result mapping.
//!
//! # Design
//! `Client` owns one `Request` (its base URL, headers and default
//! parameters) and a `Sender`. Each verb sets the method on that request,
//! optionally replaces its parameters, sends it, and maps the raw outcome
//! into a `Response` with `make_response`. Transport failures never surface
//! as `Err`: they become a degraded `Response` so ordinary network trouble
//! needs no error handling at the call site. Only invalid arguments
//! (non-scalar parameters) are returned as `Err`.

use log::{trace, warn};

use crate::error::HttpError;
use crate::http::{Method, RawResponse};
use crate::key_value::KeyValue;
use crate::request::Request;
use crate::response::Response;
use crate::sender::{Sender, UreqSender};
use crate::url::Parameters;

/// Blocking HTTP client over a pluggable `Sender`.
#[derive(Debug, Clone)]
pub struct Client<S = UreqSender> {
    request: Request,
    sender: S,
}

impl Client<UreqSender> {
    pub fn new(base_url: &str) -> Self {
        Self::with_sender(base_url, UreqSender::default())
    }
}

impl<S: Sender> Client<S> {
    pub fn with_sender(base_url: &str, sender: S) -> Self {
        Self {
            request: Request::with_url(base_url),
            sender,
        }
    }

    /// The request every verb sends.
    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub fn get(&mut self, parameters: Option<&Parameters>) -> Result<Response, HttpError> {
        self.dispatch(Method::Get, parameters)
    }

    pub fn post(&mut self, parameters: Option<&Parameters>) -> Result<Response, HttpError> {
        self.dispatch(Method::Post, parameters)
    }

    pub fn put(&mut self, parameters: Option<&Parameters>) -> Result<Response, HttpError> {
        self.dispatch(Method::Put, parameters)
    }

    pub fn delete(&mut self, parameters: Option<&Parameters>) -> Result<Response, HttpError> {
        self.dispatch(Method::Delete, parameters)
    }

    /// Send an arbitrary request, replacing its parameters first if given.
    pub fn execute_request(
        &mut self,
        request: &mut Request,
        parameters: Option<&Parameters>,
    ) -> Result<Response, HttpError> {
        if parameters.is_some() {
            request.set_parameters(parameters)?;
        }
        let result = self.sender.send_request(request);
        Ok(make_response(result, request))
    }

    fn dispatch(
        &mut self,
        method: Method,
        parameters: Option<&Parameters>,
    ) -> Result<Response, HttpError> {
        self.request.set_method(method)?;
        if parameters.is_some() {
            self.request.set_parameters(parameters)?;
        }
        let result = self.sender.send_request(&self.request);
        Ok(make_response(result, &self.request))
    }
}

/// Map a sender outcome into a `Response` that remembers `request`.
pub fn make_response(result: Result<RawResponse, HttpError>, request: &Request) -> Response {
    let raw = match result {
        Ok(raw) => raw,
        Err(err) => {
            warn!("request to {} failed: {err}", request.url());
            return Response::failed(Some(request.clone()), err.to_string());
        }
    };

    let status = Some(i64::from(raw.info.http_code));
    let mut response = Response::new(status, Some(request.clone())).unwrap_or_else(|err| {
        warn!("ignoring status from {}: {err}", raw.info.url);
        let mut response = Response::default();
        response.set_request(Some(request.clone()));
        response
    });
    response
        .set_headers(Some(parse_header_block(&raw.headers)))
        .set_body(raw.body);
    response
}

/// Parse a raw `name: value` header block.
///
/// Lines are split on the first colon only, so values that themselves
/// contain colons (`Date`, `Location: http://...`) are kept whole rather
/// than dropped. Both sides are trimmed; lines without a colon (the status
/// line, blank separators) or with an empty name are skipped. A repeated
/// name keeps its last value.
pub fn parse_header_block(raw: &str) -> KeyValue {
    let mut headers = KeyValue::new();
    for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match line.split_once(':') {
            Some((name, value)) if !name.trim().is_empty() => {
                headers.set(name.trim(), value.trim().to_string());
            }
            _ => trace!("skipping header line {line:?}"),
        }
    }
    headers
}
