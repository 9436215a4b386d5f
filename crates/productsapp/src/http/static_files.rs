use std::path::{Path, PathBuf};

use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use super::{not_found, AppState};
use crate::id::IdGenerator;
use crate::store::StorageBackend;

const INDEX_FILE: &str = "index.html";

/// Map a request path onto a file under `root`.
///
/// Returns `None` for paths that try to leave `root` (`..`, backslashes, NUL).
/// A trailing slash, or the bare root, maps to `index.html`.
pub fn resolve_static_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    let mut pushed = false;
    for segment in request_path.split('/').filter(|s| !s.is_empty()) {
        if segment == "." || segment == ".." || segment.contains(['\\', '\0']) {
            return None;
        }
        path.push(segment);
        pushed = true;
    }
    if !pushed || request_path.ends_with('/') {
        path.push(INDEX_FILE);
    }
    Some(path)
}

/// Router fallback: serve GET/HEAD requests from the static directory.
pub(super) async fn serve_static<B, G>(
    State(state): State<AppState<B, G>>,
    method: Method,
    uri: Uri,
) -> Response
where
    B: StorageBackend + 'static,
    G: IdGenerator + 'static,
{
    if method != Method::GET && method != Method::HEAD {
        return not_found();
    }
    let Some(root) = state.static_dir.as_deref() else {
        return not_found();
    };
    let Some(mut path) = resolve_static_path(root, uri.path()) else {
        return not_found();
    };

    if tokio::fs::metadata(&path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
    {
        path.push(INDEX_FILE);
    }

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.essence_str().to_string())],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "static file unavailable");
            not_found()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_trailing_slash_map_to_index() {
        let root = Path::new("/srv/public");
        assert_eq!(
            resolve_static_path(root, "/"),
            Some(PathBuf::from("/srv/public/index.html"))
        );
        assert_eq!(
            resolve_static_path(root, "/docs/"),
            Some(PathBuf::from("/srv/public/docs/index.html"))
        );
    }

    #[test]
    fn nested_files_resolve_under_root() {
        let root = Path::new("/srv/public");
        assert_eq!(
            resolve_static_path(root, "/css/site.css"),
            Some(PathBuf::from("/srv/public/css/site.css"))
        );
        assert_eq!(
            resolve_static_path(root, "//app.js"),
            Some(PathBuf::from("/srv/public/app.js"))
        );
    }

    #[test]
    fn traversal_is_refused() {
        let root = Path::new("/srv/public");
        assert_eq!(resolve_static_path(root, "/../etc/passwd"), None);
        assert_eq!(resolve_static_path(root, "/a/../../b"), None);
        assert_eq!(resolve_static_path(root, "/a\\..\\b"), None);
    }
}
