//! The transport boundary and its blocking `ureq` implementation.
//!
//! # Design
//! A `Sender` takes a fully-populated `Request` and hands back the raw
//! outcome: body, header block and transfer metadata. It never builds a
//! `Response`; that mapping belongs to the client. Each `UreqSender::send_request`
//! creates its own agent and drops it before returning, so no connection
//! state outlives a single send.

use log::debug;

use crate::error::HttpError;
use crate::http::{Method, RawResponse, TransferInfo};
use crate::key_value::KeyValue;
use crate::request::Request;
use crate::url::{Parameters, Url};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Performs the network round-trip for a `Request`.
pub trait Sender {
    fn send_request(&mut self, request: &Request) -> Result<RawResponse, HttpError>;

    /// Build a request from loose parts and send it.
    fn send(
        &mut self,
        url: &str,
        method: Method,
        parameters: Option<&Parameters>,
        headers: Option<&KeyValue>,
    ) -> Result<RawResponse, HttpError> {
        let mut request = Request::with_url(url);
        request.set_method(method)?.set_parameters(parameters)?;
        if let Some(headers) = headers {
            request.set_headers(headers.iter().map(|(k, v)| (k.clone(), v.clone())))?;
        }
        self.send_request(&request)
    }
}

/// Blocking sender backed by `ureq`.
///
/// 4xx and 5xx statuses are returned as data, and redirects are followed.
#[derive(Debug, Clone, Default)]
pub struct UreqSender {
    user_agent: Option<String>,
}

impl UreqSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: Some(user_agent.into()),
        }
    }

    fn agent(&self) -> ureq::Agent {
        ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent()
    }

    fn apply_headers<B>(
        &self,
        mut builder: ureq::RequestBuilder<B>,
        request: &Request,
    ) -> ureq::RequestBuilder<B> {
        if let Some(user_agent) = &self.user_agent {
            builder = builder.header("user-agent", user_agent.as_str());
        }
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }
}

impl Sender for UreqSender {
    fn send_request(&mut self, request: &Request) -> Result<RawResponse, HttpError> {
        let method = request.method().unwrap_or(Method::Get);
        let (target, form) = encode_target(request, method);
        debug!("{method} {target}");

        let agent = self.agent();
        let result = match form {
            None => {
                let builder = match method {
                    Method::Head => agent.head(&target),
                    Method::Delete => agent.delete(&target),
                    _ => agent.get(&target),
                };
                self.apply_headers(builder, request).call()
            }
            Some(form) => {
                let builder = match method {
                    Method::Put => agent.put(&target),
                    Method::Patch => agent.patch(&target),
                    _ => agent.post(&target),
                };
                let mut builder = self.apply_headers(builder, request);
                if !has_header(request.headers(), "content-type") {
                    builder = builder.content_type(FORM_CONTENT_TYPE);
                }
                builder.send(form.as_bytes())
            }
        };
        let mut response = result.map_err(|e| HttpError::Transport(e.to_string()))?;

        let mut headers = format!("{:?} {}\r\n", response.version(), response.status());
        for (name, value) in response.headers() {
            headers.push_str(&format!(
                "{name}: {}\r\n",
                String::from_utf8_lossy(value.as_bytes())
            ));
        }
        headers.push_str("\r\n");

        let info = TransferInfo {
            http_code: response.status().as_u16(),
            content_type: response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            header_size: headers.len(),
            url: target,
        };
        let body = match method {
            Method::Head => String::new(),
            // Invalid UTF-8 is replaced, not treated as a failed round-trip.
            _ => {
                let bytes = response
                    .body_mut()
                    .read_to_vec()
                    .map_err(|e| HttpError::Transport(e.to_string()))?;
                String::from_utf8_lossy(&bytes).into_owned()
            }
        };

        Ok(RawResponse {
            body,
            headers,
            info,
        })
    }
}

/// The URL to request and, for body-carrying methods, the urlencoded form.
///
/// Query methods merge the request parameters into a copy of the URL; the
/// request itself is left untouched.
pub fn encode_target(request: &Request, method: Method) -> (String, Option<String>) {
    if method.sends_parameters_in_query() {
        let mut url: Url = request.url().clone();
        url.set_parameters(Some(request.parameters()));
        (url.build(), None)
    } else {
        let form = Url::make_query_string(request.parameters());
        (request.url().build(), Some(form))
    }
}

fn has_header(headers: &KeyValue, name: &str) -> bool {
    headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
}
