//! HTTP surface of the dashboard.
//!
//! Requests are handled one at a time from the `tiny_http` incoming loop, so
//! no two view invocations ever overlap.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tiny_http::{Header, Method, Request, Response, Server};

use crate::app::DashboardApp;
use crate::controller::{Outputs, RawEvent};
use crate::error::DispatchError;

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self { ok: true, data: Some(data), error: None }
    }

    fn failure(error: impl ToString) -> Self {
        Self { ok: false, data: None, error: Some(error.to_string()) }
    }
}

/// Query-string form of an update: `?changed=..&site=..&low=..&high=..`
#[derive(Deserialize, Debug)]
struct UpdateQuery {
    changed: String,
    site: String,
    low: f64,
    high: f64,
}

impl From<UpdateQuery> for RawEvent {
    fn from(q: UpdateQuery) -> Self {
        RawEvent {
            changed: q.changed,
            site: JsonValue::String(q.site),
            payload: serde_json::json!([q.low, q.high]),
        }
    }
}

/// A response before it is written to the socket.
#[derive(Debug, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn html(body: &str) -> Self {
        Reply { status: 200, content_type: "text/html; charset=utf-8", body: body.to_string() }
    }

    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Reply { status, content_type: "application/json", body },
            Err(e) => {
                log::error!("serializing response: {e}");
                Reply {
                    status: 500,
                    content_type: "application/json",
                    body: r#"{"ok":false,"data":null,"error":"serialization failed"}"#.to_string(),
                }
            }
        }
    }

    fn not_found() -> Self {
        Reply { status: 404, content_type: "text/plain", body: "Not found".to_string() }
    }
}

/// Bind `addr` and serve until the process exits.
pub fn start(app: &DashboardApp, addr: &str) -> Result<()> {
    let server = Server::http(addr).map_err(|e| anyhow!("binding {addr}: {e}"))?;

    log::info!("Dashboard running on http://{addr}/");

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, app) {
            log::warn!("request failed: {e}");
        }
    }

    Ok(())
}

fn handle_request(mut request: Request, app: &DashboardApp) -> std::io::Result<()> {
    let method = request.method().clone();
    let url = request.url().to_string();

    let mut body = Vec::new();
    if method == Method::Post {
        request.as_reader().read_to_end(&mut body)?;
    }

    let reply = route(app, &method, &url, &body);
    log::debug!("{method} {url} → {}", reply.status);

    // Static header bytes; `from_bytes` only fails on malformed names.
    let content_type = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes())
        .map_err(|_| std::io::Error::other("invalid content type header"))?;
    let response = Response::from_string(reply.body)
        .with_status_code(reply.status)
        .with_header(content_type);
    request.respond(response)
}

/// Map a request to its reply. Kept free of I/O so it can be tested directly.
pub fn route(app: &DashboardApp, method: &Method, url: &str, body: &[u8]) -> Reply {
    let mut parts = url.splitn(2, '?');
    let path = parts.next().unwrap_or("/");
    let query = parts.next().unwrap_or("");

    match (method, path) {
        (&Method::Get, "/") => Reply::html(app.page_html()),

        (&Method::Get, "/api/layout") => Reply::json(200, &ApiResponse::success(&app.layout)),

        (&Method::Get, "/api/render") => outputs_reply(app.initial_outputs()),

        (&Method::Post, "/api/update") => {
            let Ok(body) = std::str::from_utf8(body) else {
                return bad_request("request body is not UTF-8");
            };
            match serde_json::from_str::<RawEvent>(body) {
                Ok(raw) => outputs_reply(app.handle_event(raw)),
                Err(e) => bad_request(format!("malformed update: {e}")),
            }
        }

        (&Method::Get, "/api/update") => match serde_urlencoded::from_str::<UpdateQuery>(query) {
            Ok(q) => outputs_reply(app.handle_event(q.into())),
            Err(e) => bad_request(format!("malformed update query: {e}")),
        },

        _ => Reply::not_found(),
    }
}

fn outputs_reply(result: std::result::Result<Outputs, DispatchError>) -> Reply {
    match result {
        Ok(outputs) => Reply::json(200, &ApiResponse::success(outputs)),
        Err(e @ DispatchError::ViewFailed { .. }) => {
            Reply::json(500, &ApiResponse::<()>::failure(e))
        }
        Err(e) => bad_request(e),
    }
}

fn bad_request(error: impl ToString) -> Reply {
    let error = error.to_string();
    log::warn!("{error}");
    Reply::json(400, &ApiResponse::<()>::failure(error))
}
