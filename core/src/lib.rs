//! Small blocking HTTP client with a structured URL model.
//!
//! # Overview
//! A `Request` (URL, method, headers, parameters) is handed to a pluggable
//! `Sender`, which performs the round-trip and returns the raw body, header
//! block and transfer metadata. The `Client` maps that raw outcome into a
//! `Response` with a status, derived success flag, parsed headers and a
//! JSON helper.
//!
//! # Design
//! - `Url` keeps its raw components, path segments and query parameters in
//!   lockstep: every mutator re-derives the composed path and query before
//!   returning.
//! - Lookups of absent values return `Option`; soft setters on `Url` return
//!   `bool`; invalid arguments to `Request`/`Response` return `HttpError`.
//! - Transport failures are absorbed by the `Client` into a degraded
//!   `Response` instead of an `Err`.

pub mod client;
pub mod error;
pub mod http;
pub mod key_value;
pub mod request;
pub mod response;
pub mod sender;
pub mod url;

pub use client::{make_response, parse_header_block, Client};
pub use error::HttpError;
pub use http::{Method, RawResponse, TransferInfo};
pub use key_value::KeyValue;
pub use request::Request;
pub use response::Response;
pub use sender::{Sender, UreqSender};
pub use url::{Components, Credentials, Parameters, Url};
