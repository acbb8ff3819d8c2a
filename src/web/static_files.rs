//! Embedded front end with SPA fallback.
//!
//! The files under `web/` are compiled into the binary so the server is a
//! single executable.

use axum::{
    body::Body,
    extract::Request,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;
use std::path::Path;

/// Embedded front-end files.
#[derive(Embed)]
#[folder = "web"]
#[include = "*.html"]
#[include = "*.js"]
#[include = "*.css"]
#[include = "*.svg"]
#[include = "*.ico"]
#[include = "assets/*"]
pub struct StaticAssets;

/// Serves static files with SPA fallback.
///
/// Tries the exact path, then the path with `.html` appended. Paths that
/// look like files and are not found give 404; every other path serves
/// `index.html`.
pub async fn serve_static(request: Request) -> Response {
    let path = request.uri().path().trim_start_matches('/');

    if path.is_empty() {
        return serve_file("index.html");
    }

    if let Some(content) = StaticAssets::get(path) {
        return file_response(path, content.data.as_ref());
    }

    let html_path = format!("{path}.html");
    if let Some(content) = StaticAssets::get(&html_path) {
        return file_response(&html_path, content.data.as_ref());
    }

    let looks_like_file = Path::new(path)
        .extension()
        .is_some_and(|ext| !ext.is_empty());

    // Unknown API routes must not turn into HTML pages.
    if looks_like_file || path.starts_with("api/") {
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    }

    serve_file("index.html")
}

fn serve_file(path: &str) -> Response {
    match StaticAssets::get(path) {
        Some(content) => file_response(path, content.data.as_ref()),
        None => (StatusCode::NOT_FOUND, "File not found").into_response(),
    }
}

fn file_response(path: &str, content: &[u8]) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, cache_control_for_path(path))
        .body(Body::from(content.to_vec()))
        .unwrap_or_else(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create response",
            )
                .into_response()
        })
}

/// Cache policy: HTML always revalidates, `assets/` is cached for a day,
/// everything else for an hour.
fn cache_control_for_path(path: &str) -> &'static str {
    if path.starts_with("assets/") {
        "public, max-age=86400"
    } else if Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
    {
        "no-cache, must-revalidate"
    } else {
        "public, max-age=3600"
    }
}

/// Whether the front end was embedded.
#[must_use]
pub fn has_embedded_assets() -> bool {
    StaticAssets::get("index.html").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_control_for_path() {
        assert_eq!(cache_control_for_path("assets/logo.svg"), "public, max-age=86400");
        assert_eq!(cache_control_for_path("index.html"), "no-cache, must-revalidate");
        assert_eq!(cache_control_for_path("app.js"), "public, max-age=3600");
    }

    #[test]
    fn test_index_is_embedded() {
        assert!(has_embedded_assets());
        let names: Vec<String> = StaticAssets::iter().map(|s| s.to_string()).collect();
        assert!(names.iter().any(|n| n == "app.js"));
    }

    #[test]
    fn test_front_end_needs_browser_speech_support_for_voice() {
        let file = StaticAssets::get("app.js").unwrap();
        let script = std::str::from_utf8(&file.data).unwrap();

        assert!(script.contains("capabilities.voice_input && Boolean(speechRecognition())"));
        assert!(script.contains("not supported in this browser"));
        assert!(script.contains("/selection"));
    }
}
