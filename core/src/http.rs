//! HTTP transport types exchanged with a `Sender`.
//!
//! # Design
//! These types describe what crosses the transport boundary as plain data:
//! the fixed method enumeration going out, and the raw body, raw header
//! block and transfer metadata coming back. Turning the raw result into a
//! structured `Response` is the client's job, not the sender's.

use std::fmt;
use std::str::FromStr;

use crate::error::HttpError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Head,
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Every method a `Request` accepts.
    pub const ALL: [Method; 6] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Patch,
        Method::Head,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Head => "HEAD",
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Whether request parameters travel in the URL query rather than the body.
    pub fn sends_parameters_in_query(&self) -> bool {
        matches!(self, Method::Get | Method::Delete | Method::Head)
    }
}

/// Matching is exact: `"get"` is rejected.
impl FromStr for Method {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| HttpError::InvalidMethod(s.to_string()))
    }
}

impl AsRef<str> for Method {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transfer metadata reported by the sender alongside the raw response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferInfo {
    pub http_code: u16,
    pub content_type: Option<String>,
    /// Length in bytes of the raw header block.
    pub header_size: usize,
    /// The URL actually requested, after parameters were merged in.
    pub url: String,
}

/// The unparsed outcome of one round-trip.
///
/// `headers` is the raw block: a status line followed by `name: value`
/// lines separated by newlines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub body: String,
    pub headers: String,
    pub info: TransferInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_valid_method() {
        for method in Method::ALL {
            assert_eq!(method.as_str().parse::<Method>().unwrap(), method);
        }
    }

    #[test]
    fn rejects_unknown_and_lowercase_methods() {
        assert!(matches!("get".parse::<Method>(), Err(HttpError::InvalidMethod(m)) if m == "get"));
        assert!("OPTIONS".parse::<Method>().is_err());
        assert!("".parse::<Method>().is_err());
    }

    #[test]
    fn query_methods() {
        assert!(Method::Get.sends_parameters_in_query());
        assert!(Method::Head.sends_parameters_in_query());
        assert!(Method::Delete.sends_parameters_in_query());
        assert!(!Method::Post.sends_parameters_in_query());
        assert!(!Method::Patch.sends_parameters_in_query());
    }
}
