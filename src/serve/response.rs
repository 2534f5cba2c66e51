//! HTTP response handlers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use super::inject::maybe_inject_livereload;
use crate::embed::serve::{LIVERELOAD_JS, LivereloadVars};
use crate::utils::mime::{self, types};

/// Respond with a file from the output tree.
pub fn respond_file(request: Request, path: &Path, ws_port: Option<u16>) -> Result<()> {
    let content_type = mime::from_path(path);

    if is_head(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let body = maybe_inject_livereload(body, content_type, ws_port);
    send_body(request, 200, content_type, body)
}

/// 404 with the site's own `404.html` when it has one.
pub fn respond_not_found(request: Request, root: &Path, ws_port: Option<u16>) -> Result<()> {
    let custom = root.join("404.html");
    let custom = custom.is_file().then(|| fs::read(&custom).ok()).flatten();

    let content_type = if custom.is_some() { types::HTML } else { types::PLAIN };
    if is_head(&request) {
        return send_head(request, 404, content_type);
    }

    let body = match custom {
        Some(body) => maybe_inject_livereload(body, types::HTML, ws_port),
        None => b"404 Not Found".to_vec(),
    };
    send_body(request, 404, content_type, body)
}

/// Live-reload client, rendered for the bound WebSocket port.
pub fn respond_livereload_js(request: Request, ws_port: u16) -> Result<()> {
    let body = LIVERELOAD_JS.render(&LivereloadVars { ws_port });
    send_body(request, 200, types::JAVASCRIPT, body.into_bytes())
}

/// Server shutting down.
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, types::PLAIN, b"503 Service Unavailable".to_vec())
}

pub fn respond_not_allowed(request: Request) -> Result<()> {
    let response = Response::from_data(b"405 Method Not Allowed".to_vec())
        .with_status_code(StatusCode(405))
        .with_header(make_header("Content-Type", types::PLAIN)?)
        .with_header(make_header("Allow", "GET, HEAD")?);
    request.respond(response)?;
    Ok(())
}

fn is_head(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &str) -> Result<()> {
    let response = Response::empty(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn send_body(request: Request, status: u16, content_type: &str, body: Vec<u8>) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?)
        .with_header(make_header("Cache-Control", "no-cache")?);
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key.as_bytes(), value.as_bytes())
        .map_err(|()| anyhow!("invalid header `{key}: {value}`"))
}
