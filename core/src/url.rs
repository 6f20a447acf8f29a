//! URL component model with structured path segments and query parameters.
//!
//! # Design
//! A `Url` owns three views of the same address: the raw `Components`
//! (scheme, credentials, host, port, path, query, fragment), the ordered
//! path segments, and the ordered query parameters. Every mutator that
//! touches segments or parameters re-derives `components.path` /
//! `components.query` before returning, so `build()` is a pure read and the
//! views can never drift apart.
//!
//! Setters that accept "anything" take `impl Into<serde_json::Value>` and
//! report unsupported shapes with `false` instead of an error. Parameter and
//! segment values must be strings or numbers.

use std::fmt;

use serde_json::Value;

use crate::key_value::KeyValue;

/// Query parameters: name to string, number, or `Null` for a bare token.
pub type Parameters = KeyValue<Value>;

/// Whitespace stripped from segments and anchors, including U+3000.
const BLANKS: &[char] = &[' ', '\u{3000}', '\t', '\n', '\r', '\0', '\x0B'];

/// The raw parts of a URL. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Components {
    pub scheme: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: Option<String>,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub user: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Url {
    components: Components,
    segments: Vec<String>,
    parameters: Parameters,
}

impl Url {
    /// An empty URL: no components, no segments, no parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `url`, returning `None` if it cannot be decomposed.
    pub fn parse(url: &str) -> Option<Self> {
        let mut parsed = Self::new();
        parsed.set_url(url).then_some(parsed)
    }

    /// Serialize `parameters` as `key=value` pairs joined by `&`.
    ///
    /// Values are form-urlencoded (space becomes `+`), keys are written
    /// verbatim, and a `Null` value produces an empty right-hand side.
    pub fn make_query_string(parameters: &Parameters) -> String {
        parameters
            .iter()
            .map(|(key, value)| format!("{key}={}", encode_value(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    /// Replace the whole URL with the components parsed from `url`.
    ///
    /// Returns `false` and leaves the current state untouched if `url` is
    /// malformed (empty host after `//`, non-numeric or out-of-range port,
    /// unterminated IPv6 literal).
    pub fn set_url(&mut self, url: &str) -> bool {
        let Some(components) = parse_components(url) else {
            return false;
        };

        self.components = components;
        self.segments.clear();
        self.parameters.clear();

        if let Some(query) = self.components.query.clone() {
            self.set_query_string(&query);
        }
        if let Some(path) = self.components.path.clone() {
            self.set_path(path);
        }
        true
    }

    /// Reassemble the URL string from the current components.
    ///
    /// Order is fixed: `scheme://`, `user[:pass]@`, `host[:port]`, path
    /// (`/` if absent), `?query` if non-empty, `#fragment`.
    pub fn build(&self) -> String {
        let c = &self.components;
        let mut url = String::new();

        if let Some(scheme) = &c.scheme {
            url.push_str(scheme);
            url.push_str("://");
        }
        if let Some(user) = &c.user {
            url.push_str(user);
            if let Some(pass) = &c.pass {
                url.push(':');
                url.push_str(pass);
            }
            url.push('@');
        }
        if let Some(host) = &c.host {
            url.push_str(host);
            if let Some(port) = c.port {
                url.push(':');
                url.push_str(&port.to_string());
            }
        }
        url.push_str(c.path.as_deref().unwrap_or("/"));
        if let Some(query) = c.query.as_deref().filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }
        if let Some(fragment) = &c.fragment {
            url.push('#');
            url.push_str(fragment);
        }
        url
    }

    pub fn query_string(&self) -> String {
        Self::make_query_string(&self.parameters)
    }

    /// Replace all parameters with the entries of `query`.
    ///
    /// `key=value` stores the value as received (no percent-decoding), a
    /// bare `key` stores `Null`, anything with more than one `=` is skipped,
    /// as are empty entries.
    pub fn set_query_string(&mut self, query: &str) -> bool {
        let mut parameters = Parameters::new();
        for entry in query.split('&').filter(|entry| !entry.is_empty()) {
            let parts: Vec<&str> = entry.split('=').collect();
            match parts.as_slice() {
                [key] => parameters.set(*key, Value::Null),
                [key, value] => parameters.set(*key, Value::String((*value).to_string())),
                _ => {}
            }
        }
        self.parameters = parameters;
        self.sync_query();
        true
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    /// Set one parameter. Rejects values that are not strings or numbers.
    pub fn set_parameter(&mut self, name: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        if !is_scalar(&value) {
            return false;
        }
        self.parameters.set(name, value);
        self.sync_query();
        true
    }

    /// Merge `parameters` into the current ones, or clear them on `None`.
    ///
    /// Every entry is validated first; a single non-scalar value rejects
    /// the whole batch and nothing is merged.
    pub fn set_parameters(&mut self, parameters: Option<&Parameters>) -> bool {
        let accepted = match parameters {
            None => {
                self.parameters.clear();
                true
            }
            Some(incoming) if incoming.iter().all(|(_, value)| is_scalar(value)) => {
                for (name, value) in incoming {
                    self.parameters.set(name.clone(), value.clone());
                }
                true
            }
            Some(_) => false,
        };
        self.sync_query();
        accepted
    }

    pub fn is_secure(&self) -> bool {
        self.components
            .scheme
            .as_deref()
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https"))
    }

    /// A password without a user does not count.
    pub fn has_credentials(&self) -> bool {
        self.components.user.is_some()
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            user: self.components.user.clone(),
            password: self.components.pass.clone(),
        }
    }

    /// Store form-urlencoded credentials. A `None` password leaves any
    /// existing one in place.
    pub fn set_credentials(&mut self, user: &str, password: Option<&str>) -> bool {
        self.components.user = Some(encode(user));
        if let Some(password) = password {
            self.components.pass = Some(encode(password));
        }
        true
    }

    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    pub fn path_segments(&self) -> &[String] {
        &self.segments
    }

    pub fn path_segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// Replace the path.
    ///
    /// A string is split on `/` after trimming, an array has each element
    /// appended as a segment, `Null` clears the path. Other values are
    /// rejected and leave the path as it was.
    pub fn set_path(&mut self, path: impl Into<Value>) -> bool {
        match path.into() {
            Value::String(path) => {
                self.segments.clear();
                for segment in trim_segment(&path).split('/') {
                    self.push_segment(segment.to_string());
                }
            }
            Value::Array(segments) => {
                self.segments.clear();
                for segment in segments {
                    self.add_path_segment(segment);
                }
            }
            Value::Null => self.segments.clear(),
            _ => return false,
        }
        self.sync_path();
        true
    }

    /// Append a segment.
    ///
    /// Emptiness is checked on the trimmed value, but the value is stored
    /// exactly as given: `" a "` is appended with its spaces.
    pub fn add_path_segment(&mut self, segment: impl Into<Value>) -> bool {
        let segment = match segment.into() {
            Value::String(segment) => segment,
            Value::Number(number) => number.to_string(),
            _ => return false,
        };
        if !self.push_segment(segment) {
            return false;
        }
        self.sync_path();
        true
    }

    pub fn remove_path_segment(&mut self, index: usize) -> bool {
        if index >= self.segments.len() {
            return false;
        }
        self.segments.remove(index);
        self.sync_path();
        true
    }

    pub fn anchor(&self) -> Option<&str> {
        self.components.fragment.as_deref()
    }

    /// Set the fragment. Blank strings and `Null` remove it.
    pub fn set_anchor(&mut self, value: impl Into<Value>) -> bool {
        match value.into() {
            Value::String(value) => {
                let trimmed = value.trim_matches(BLANKS);
                self.components.fragment = (!trimmed.is_empty()).then(|| trimmed.to_string());
                true
            }
            Value::Null => {
                self.components.fragment = None;
                true
            }
            _ => false,
        }
    }

    fn push_segment(&mut self, segment: String) -> bool {
        if trim_segment(&segment).is_empty() {
            return false;
        }
        self.segments.push(segment);
        true
    }

    fn sync_path(&mut self) {
        self.components.path = Some(self.path());
    }

    fn sync_query(&mut self) {
        self.components.query = Some(self.query_string());
    }
}

impl From<&str> for Url {
    /// Lenient construction: unparseable input yields an empty URL.
    fn from(url: &str) -> Self {
        Self::parse(url).unwrap_or_default()
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

fn trim_segment(segment: &str) -> &str {
    segment.trim_matches(|c: char| c == '/' || BLANKS.contains(&c))
}

fn is_scalar(value: &Value) -> bool {
    value.is_string() || value.is_number()
}

fn encode(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

fn encode_value(value: &Value) -> String {
    match value {
        Value::String(s) => encode(s),
        Value::Null => String::new(),
        other => encode(&other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Split `url` into components, or `None` if it is malformed.
fn parse_components(url: &str) -> Option<Components> {
    let mut c = Components::default();
    let mut rest = url;

    if let Some((before, fragment)) = rest.split_once('#') {
        c.fragment = Some(fragment.to_string());
        rest = before;
    }
    if let Some((before, query)) = rest.split_once('?') {
        c.query = Some(query.to_string());
        rest = before;
    }

    if let Some((scheme, after)) = split_scheme(rest) {
        c.scheme = Some(scheme.to_string());
        rest = after;
    } else if is_bare_host_port(rest) {
        // "localhost:8080/path" has an authority but no "//".
        let (authority, path) = split_authority(rest);
        parse_authority(authority, &mut c)?;
        rest = path;
    }

    if let Some(after) = rest.strip_prefix("//") {
        let (authority, path) = split_authority(after);
        parse_authority(authority, &mut c)?;
        rest = path;
    }

    if !rest.is_empty() {
        c.path = Some(rest.to_string());
    }
    Some(c)
}

fn split_scheme(input: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = input.split_once(':')?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid || is_bare_host_port(input) {
        return None;
    }
    Some((scheme, rest))
}

/// `host:digits` followed by `/` or the end of input.
fn is_bare_host_port(input: &str) -> bool {
    let Some((host, rest)) = input.split_once(':') else {
        return false;
    };
    let port = rest.split('/').next().unwrap_or_default();
    !host.is_empty()
        && !host.contains('/')
        && !port.is_empty()
        && port.bytes().all(|b| b.is_ascii_digit())
}

fn split_authority(input: &str) -> (&str, &str) {
    match input.find('/') {
        Some(index) => input.split_at(index),
        None => (input, ""),
    }
}

fn parse_authority(authority: &str, c: &mut Components) -> Option<()> {
    let host_port = match authority.rsplit_once('@') {
        Some((userinfo, host_port)) => {
            match userinfo.split_once(':') {
                Some((user, pass)) => {
                    c.user = non_empty(user);
                    c.pass = Some(pass.to_string());
                }
                None => c.user = non_empty(userinfo),
            }
            host_port
        }
        None => authority,
    };

    let (host, port) = split_host_port(host_port)?;
    if host.is_empty() {
        return None;
    }
    c.host = Some(host.to_string());
    c.port = port;
    Some(())
}

/// An empty user is no user: `http://:secret@host/` has only a password.
fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn split_host_port(input: &str) -> Option<(&str, Option<u16>)> {
    let (host, port) = if input.starts_with('[') {
        let end = input.find(']')? + 1;
        let (host, rest) = input.split_at(end);
        match rest {
            "" => (host, None),
            _ => (host, Some(rest.strip_prefix(':')?)),
        }
    } else {
        match input.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (input, None),
        }
    };

    match port {
        None | Some("") => Some((host, None)),
        Some(port) if port.bytes().all(|b| b.is_ascii_digit()) => {
            Some((host, Some(port.parse().ok()?)))
        }
        Some(_) => None,
    }
}
