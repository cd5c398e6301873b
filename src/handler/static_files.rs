//! Static file serving module
//!
//! Resolves request paths under the session root and builds file, index
//! and directory-listing responses.

use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::range::{self, RangeOutcome};
use crate::http::{self, cache, mime, response};
use crate::logger;

/// What a request path points at inside the session root.
#[derive(Debug)]
enum Resolved {
    File(PathBuf),
    Directory(PathBuf),
    NotFound,
}

/// Serve a GET/HEAD request from the session root.
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match resolve_path(&state.root, ctx.path) {
        Resolved::File(path) => serve_file(ctx, &path).await,
        Resolved::Directory(path) => serve_directory(ctx, state, &path).await,
        Resolved::NotFound => http::build_404_response(),
    }
}

/// Resolve a request path to a file or directory under `root`.
///
/// Both sides are canonicalized and the candidate is required to stay
/// under the root, so `..` segments cannot escape the session root.
fn resolve_path(root: &Path, request_path: &str) -> Resolved {
    let relative = request_path.trim_start_matches('/');
    let candidate = root.join(relative);

    let Ok(root_canonical) = root.canonicalize() else {
        // The launcher validated the root at startup; it may have been
        // removed since
        return Resolved::NotFound;
    };
    // Canonicalize also fails for paths that do not exist (404)
    let Ok(candidate) = candidate.canonicalize() else {
        return Resolved::NotFound;
    };
    if !candidate.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            candidate.display()
        ));
        return Resolved::NotFound;
    }

    if candidate.is_dir() {
        Resolved::Directory(candidate)
    } else {
        Resolved::File(candidate)
    }
}

/// Serve a directory: first matching index file, otherwise a listing.
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
) -> Response<Full<Bytes>> {
    for index_file in &state.config.http.index_files {
        let index_path = dir.join(index_file);
        if index_path.is_file() {
            return serve_file(ctx, &index_path).await;
        }
    }

    match listing::render_directory(dir, ctx.path).await {
        Ok(html) => response::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to list directory '{}': {e}", dir.display()));
            http::build_404_response()
        }
    }
}

/// Read a file and build its response.
async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<Full<Bytes>> {
    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            return http::build_404_response();
        }
    };

    let content_type = mime::content_type_for(path.extension().and_then(|e| e.to_str()));
    build_file_response(&content, content_type, ctx)
}

/// Build a file response with `ETag` and Range support.
fn build_file_response(
    data: &[u8],
    content_type: &'static str,
    ctx: &RequestContext<'_>,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(data);
    let total_size = data.len();

    if cache::if_none_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    match range::parse(ctx.range_header.as_deref(), total_size) {
        RangeOutcome::Satisfiable(r) => {
            let start = r.start;
            let end = r.end_position(total_size);
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::from(data[start..=end].to_vec())
            };
            response::build_partial_response(body, content_type, &etag, start, end, total_size)
        }
        RangeOutcome::Unsatisfiable => http::build_416_response(total_size),
        RangeOutcome::Ignored => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::from(data.to_owned())
            };
            response::build_cached_response(body, content_type, &etag, total_size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            is_head: false,
            if_none_match: None,
            range_header: None,
        }
    }

    fn test_state(root: &Path) -> AppState {
        let config = Config::load_from("no_such_config_file").unwrap();
        AppState::new(config, root.canonicalize().unwrap())
    }

    #[test]
    fn resolves_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();
        match resolve_path(dir.path(), "/a.txt") {
            Resolved::File(path) => assert!(path.ends_with("a.txt")),
            other => panic!("expected File, got {other:?}"),
        }
    }

    #[test]
    fn resolves_root_as_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(resolve_path(dir.path(), "/"), Resolved::Directory(_)));
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            resolve_path(dir.path(), "/nope"),
            Resolved::NotFound
        ));
    }

    #[test]
    fn traversal_cannot_escape_the_root() {
        let outer = tempfile::tempdir().unwrap();
        let root = outer.path().join("public");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(outer.path().join("secret.txt"), b"secret").unwrap();

        assert!(matches!(
            resolve_path(&root, "/../secret.txt"),
            Resolved::NotFound
        ));
    }

    #[tokio::test]
    async fn directory_with_index_serves_the_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), b"<h1>home</h1>").unwrap();
        let state = test_state(dir.path());

        let resp = serve(&ctx("/"), &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
        assert_eq!(resp.headers()["Content-Length"], "13");
    }

    #[tokio::test]
    async fn directory_without_index_gets_a_listing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"n").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let state = test_state(dir.path());

        let resp = serve(&ctx("/"), &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
    }

    #[test]
    fn matching_etag_returns_not_modified() {
        let data = b"cacheable";
        let etag = cache::generate_etag(data);
        let ctx = RequestContext {
            path: "/x",
            is_head: false,
            if_none_match: Some(etag.clone()),
            range_header: None,
        };
        let resp = build_file_response(data, "text/plain", &ctx);
        assert_eq!(resp.status(), 304);
        assert_eq!(resp.headers()["ETag"], etag.as_str());
    }

    #[test]
    fn range_request_returns_partial_content() {
        let data = b"0123456789";
        let ctx = RequestContext {
            path: "/x",
            is_head: false,
            if_none_match: None,
            range_header: Some("bytes=2-5".to_string()),
        };
        let resp = build_file_response(data, "text/plain", &ctx);
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers()["Content-Range"], "bytes 2-5/10");
    }

    #[test]
    fn unsatisfiable_range_returns_416() {
        let data = b"short";
        let ctx = RequestContext {
            path: "/x",
            is_head: false,
            if_none_match: None,
            range_header: Some("bytes=100-".to_string()),
        };
        let resp = build_file_response(data, "text/plain", &ctx);
        assert_eq!(resp.status(), 416);
    }

    #[test]
    fn full_response_advertises_ranges() {
        let data = b"plain body";
        let resp = build_file_response(data, "text/plain", &ctx("/x"));
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Accept-Ranges"], "bytes");
        assert_eq!(resp.headers()["Content-Length"], "10");
    }
}
