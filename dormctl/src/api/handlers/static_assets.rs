//! HTTP handler for the embedded landing page.

use axum::{
    body::Body,
    http::{Response, StatusCode, Uri, header},
    response::IntoResponse,
};
use tracing::instrument;

use crate::static_assets::Assets;

/// Serve a file from the embedded `static/` bundle.
///
/// The bundle is a plain landing page, not a client-routed app, so a path
/// that matches no embedded file is a real 404 rather than an index
/// fallback. Directory-style requests (`/`, anything ending in `/`) resolve
/// to `index.html`.
#[instrument]
pub async fn serve_embedded_asset(uri: Uri) -> impl IntoResponse {
    let requested = uri.path().trim_start_matches('/');
    let path = if requested.is_empty() || requested.ends_with('/') {
        "index.html"
    } else {
        requested
    };

    match embedded_response(path) {
        Some(response) => response,
        None => Response::builder().status(StatusCode::NOT_FOUND).body(Body::empty()).unwrap(),
    }
}

fn embedded_response(path: &str) -> Option<Response<Body>> {
    let asset = Assets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    // The page itself must pick up redeploys immediately; everything else
    // (favicon, any styling) can sit in caches for an hour
    let cache_control = if path.ends_with(".html") {
        "no-cache"
    } else {
        "public, max-age=3600"
    };

    let response = Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, cache_control)
        .body(Body::from(asset.data.into_owned()))
        .unwrap();

    Some(response)
}
