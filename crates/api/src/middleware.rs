use std::sync::Arc;

use axum::{
    body::Body,
    extract::{OriginalUri, State},
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use learnhub_auth::{AccessDecision, Role, SessionProvider, guard};

use crate::context::{AuthorizedSession, SessionContext};

/// Name of the cookie carrying the session token for browser requests.
pub const SESSION_COOKIE: &str = "session";

#[derive(Clone)]
pub struct SessionState {
    pub provider: Arc<dyn SessionProvider>,
}

/// Resolve the request's session and attach it as [`SessionContext`].
///
/// Never rejects: a missing, malformed or expired token simply means "no
/// session", and the page tree's guard decides what that implies.
pub async fn session_middleware(
    State(state): State<SessionState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let now = Utc::now();
    let session = candidate_tokens(req.headers()).into_iter().find_map(|token| {
        state
            .provider
            .session(&token, now)
            .map_err(|e| tracing::debug!(error = %e, "ignoring unusable session token"))
            .ok()
    });

    req.extensions_mut().insert(SessionContext::new(session));
    next.run(req).await
}

/// Gate a page tree on `required`.
///
/// Applied once per tree; redirects are issued here so the decision itself
/// stays a plain value.
pub async fn guard_middleware(
    State(required): State<Role>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let context = req
        .extensions()
        .get::<SessionContext>()
        .cloned()
        .unwrap_or_default();

    let requested = requested_path(&req);

    match guard(context.session(), required, &requested) {
        AccessDecision::Allow => {
            if let Some(session) = context.session() {
                req.extensions_mut().insert(AuthorizedSession(session.clone()));
            }
            next.run(req).await
        }
        AccessDecision::Redirect { target, .. } => Redirect::to(&target).into_response(),
    }
}

/// Path (and query) as the client sent it, before any router nesting.
fn requested_path(req: &Request<Body>) -> String {
    let uri = req
        .extensions()
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or_else(|| req.uri());

    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

/// Tokens to try, in order: the bearer token, then the session cookie.
///
/// A bearer token that fails validation does not hide a usable cookie.
fn candidate_tokens(headers: &HeaderMap) -> Vec<String> {
    let bearer = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token);

    let cookie = CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().trim().to_string());

    bearer
        .into_iter()
        .chain(cookie)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Auth schemes are case-insensitive.
fn bearer_token(value: &str) -> Option<String> {
    let (scheme, token) = value.trim().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};

    #[test]
    fn bearer_token_is_tried_before_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(header::COOKIE, HeaderValue::from_static("session=xyz"));

        assert_eq!(candidate_tokens(&headers), vec!["abc", "xyz"]);
    }

    #[test]
    fn falls_back_to_session_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; session=xyz"));

        assert_eq!(candidate_tokens(&headers), vec!["xyz"]);
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        for value in ["bearer abc", "BEARER abc", "Bearer  abc "] {
            let mut headers = HeaderMap::new();
            headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
            assert_eq!(candidate_tokens(&headers), vec!["abc"], "header {value:?}");
        }
    }

    #[test]
    fn empty_or_foreign_schemes_yield_nothing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert!(candidate_tokens(&headers).is_empty());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert!(candidate_tokens(&headers).is_empty());
    }

    #[test]
    fn requested_path_prefers_original_uri() {
        let mut req = Request::builder()
            .uri("/courses?page=2")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut()
            .insert(OriginalUri("/student/courses?page=2".parse().unwrap()));

        assert_eq!(requested_path(&req), "/student/courses?page=2");
    }
}
