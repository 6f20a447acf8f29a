use std::collections::BTreeMap;

use axum::{
    extract::Path,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Redirect},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use uuid::Uuid;

/// Response header carrying the echo's id.
pub const REQUEST_ID: &str = "x-request-id";

/// Everything the server saw of a request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub id: Uuid,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// Body served by `/binary`: not valid UTF-8.
pub const BINARY_BODY: &[u8] = &[b'o', b'k', 0xff, 0xfe];

/// `/status/{code}` answers with that status, `/redirect` sends a 303 to
/// `/echo/redirected`, `/binary` returns `BINARY_BODY`, and every other path
/// echoes the request as JSON.
pub fn app() -> Router {
    Router::new()
        .route("/status/{code}", any(status))
        .route("/redirect", get(redirect))
        .route("/binary", get(binary))
        .fallback(echo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> impl IntoResponse {
    log::debug!("echo {method} {uri}");
    let echo = Echo {
        id: Uuid::new_v4(),
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers: headers
            .iter()
            .map(|(name, value)| {
                let value = value.to_str().unwrap_or_default();
                (name.as_str().to_string(), value.to_string())
            })
            .collect(),
        body,
    };
    ([(REQUEST_ID, echo.id.to_string())], Json(echo))
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    if !(200..600).contains(&code) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    let body = match status {
        StatusCode::NO_CONTENT | StatusCode::NOT_MODIFIED => String::new(),
        _ => format!("status {code}"),
    };
    Ok((status, body))
}

async fn binary() -> &'static [u8] {
    BINARY_BODY
}

async fn redirect() -> Redirect {
    Redirect::to("/echo/redirected")
}
