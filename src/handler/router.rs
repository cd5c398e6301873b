//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, header
//! extraction and access logging around the static file handler.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderValue;
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Request context encapsulating what the static file handler needs.
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling.
///
/// Generic over the body type; the body is never read (the server only
/// answers GET and HEAD).
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let is_head = method == Method::HEAD;

    let mut response = if matches!(method, Method::GET | Method::HEAD) {
        let ctx = RequestContext {
            path: uri.path(),
            is_head,
            if_none_match: header_string(&req, "if-none-match"),
            range_header: header_string(&req, "range"),
        };
        static_files::serve(&ctx, &state).await
    } else {
        logger::log_warning(&format!("Method not allowed: {method}"));
        http::build_405_response()
    };

    if let Ok(server_name) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(hyper::header::SERVER, server_name);
    }

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = version_label(req.version());
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length(&response);
        entry.referer = header_string(&req, "referer");
        entry.user_agent = header_string(&req, "user-agent");
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: hyper::Version) -> String {
    match version {
        hyper::Version::HTTP_10 => "1.0".to_string(),
        hyper::Version::HTTP_2 => "2".to_string(),
        _ => "1.1".to_string(),
    }
}

fn content_length(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get(hyper::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
