//! Router assembly: every path goes through the redirect chain, with the
//! HTTP trace layer on top.

use std::{borrow::Cow, sync::Arc};

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{debug, Level};

use crate::redirect::chain::{RedirectChain, Resolution};

/// Body served when no handler knows the path.
pub const DEFAULT_BODY: &str = "Hello, world!\n";

/// Build the application router. There are no fixed routes; the chain
/// decides for every path.
pub fn build_router(chain: Arc<RedirectChain>) -> Router {
    Router::new()
        .fallback(redirect_or_default)
        .with_state(chain)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Percent-decoded request path; the raw path when it does not decode to UTF-8.
fn lookup_path(uri: &Uri) -> Cow<'_, str> {
    urlencoding::decode(uri.path()).unwrap_or(Cow::Borrowed(uri.path()))
}

async fn redirect_or_default(State(chain): State<Arc<RedirectChain>>, uri: Uri) -> Response {
    let path = lookup_path(&uri);
    match chain.resolve(&path) {
        Resolution::Redirect { handler, url } => {
            debug!(target: "urlshort", %path, %handler, %url, "Redirecting");
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, url.to_string())]).into_response()
        }
        Resolution::Fallthrough => {
            debug!(target: "urlshort", %path, "No redirect; serving default");
            default_response()
        }
    }
}

fn default_response() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        DEFAULT_BODY,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::source::{builtin_redirects, MappingSource, DEFAULT_YAML};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        let json = MappingSource::Json(
            r#"[{"path": "/gh", "url": "https://github.com"}, {"path": "/café", "url": "https://cafe.example"}, {"path": "/two words", "url": "https://space.example"}]"#
                .as_bytes()
                .to_vec(),
        );
        let yaml = MappingSource::Yaml(DEFAULT_YAML.as_bytes().to_vec());
        let chain = RedirectChain::standard(json, yaml, MappingSource::Literal(builtin_redirects()))
            .unwrap();
        build_router(Arc::new(chain))
    }

    async fn get(app: Router, path: &str) -> Response {
        app.oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn json_only_path_redirects_permanently() {
        let resp = get(app(), "/gh").await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[header::LOCATION], "https://github.com");
    }

    #[tokio::test]
    async fn yaml_and_builtin_paths_redirect() {
        let resp = get(app(), "/urlshort-final").await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            resp.headers()[header::LOCATION],
            "https://github.com/gophercises/urlshort/tree/solution"
        );

        let resp = get(app(), "/yaml-godoc").await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[header::LOCATION], "https://godoc.org/gopkg.in/yaml.v2");
    }

    #[tokio::test]
    async fn unknown_path_falls_through_to_hello() {
        let resp = get(app(), "/nowhere").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], DEFAULT_BODY.as_bytes());
    }

    #[tokio::test]
    async fn query_string_does_not_affect_lookup() {
        let resp = get(app(), "/gh?ref=readme").await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    }

    #[tokio::test]
    async fn encoded_paths_are_decoded_before_lookup() {
        let resp = get(app(), "/caf%C3%A9").await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[header::LOCATION], "https://cafe.example");

        let resp = get(app(), "/two%20words").await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[header::LOCATION], "https://space.example");
    }

    #[tokio::test]
    async fn undecodable_path_falls_back_to_raw_lookup() {
        // %FF is not UTF-8; the raw path is looked up and misses.
        let resp = get(app(), "/caf%FF").await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn lookup_path_decodes_or_keeps_raw() {
        let uri: Uri = "/caf%C3%A9?x=1".parse().unwrap();
        assert_eq!(lookup_path(&uri), "/café");
        let raw: Uri = "/caf%FF".parse().unwrap();
        assert_eq!(lookup_path(&raw), "/caf%FF");
    }
}
