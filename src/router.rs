//! First-match router over an ordered pattern list. Routes are evaluated in
//! the order they were declared, so authors put literal paths (`/contacts/new`)
//! before parameterized siblings (`/contacts/:id`). The list is written as a
//! literal and never re-sorted.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use actix_web::http::StatusCode;
use chrono::Utc;
use serde_json::json;
use tokio::sync::OnceCell;

use crate::db::DbService;
use crate::templates;
use crate::types::error::AppError;
use crate::types::response::Reply;
use crate::utils::webutils::BodyData;

pub type RouteParams = HashMap<String, String>;

pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<Reply, AppError>> + 'a>>;

/// A route handler: extracted path parameters plus the request context in,
/// one of the `Reply` kinds out.
pub type Handler = for<'a> fn(&'a RequestContext, RouteParams) -> HandlerFuture<'a>;

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Method+path matcher parsed from specs like `"GET/contacts/:id"`.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    method: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(spec: &str) -> Self {
        let (method, path) = spec.split_once('/').unwrap_or((spec, ""));
        let segments = split_path(path)
            .into_iter()
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_owned()),
                None => Segment::Literal(segment.to_owned()),
            })
            .collect();
        RoutePattern {
            method: method.to_owned(),
            segments,
        }
    }

    /// Exact match on method and segment count; named segments capture into
    /// the returned parameter map.
    pub fn matches(&self, method: &str, path: &str) -> Option<RouteParams> {
        if method != self.method {
            return None;
        }
        let given = split_path(path.strip_prefix('/').unwrap_or(path));
        if given.len() != self.segments.len() {
            return None;
        }
        let mut params = RouteParams::new();
        for (pattern, value) in self.segments.iter().zip(given) {
            match pattern {
                Segment::Literal(expected) if expected == value => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), value.to_owned());
                }
            }
        }
        Some(params)
    }
}

fn split_path(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').collect()
    }
}

pub struct Route {
    pub pattern: RoutePattern,
    pub handler: Handler,
    pub protected: bool,
}

impl Route {
    pub fn new(spec: &str, handler: Handler) -> Self {
        Route {
            pattern: RoutePattern::parse(spec),
            handler,
            protected: false,
        }
    }

    pub fn protected(spec: &str, handler: Handler) -> Self {
        Route {
            pattern: RoutePattern::parse(spec),
            handler,
            protected: true,
        }
    }
}

/// Everything one request carries through the pipeline. Built fresh per
/// request; nothing here outlives the request, including the memoized
/// authentication result.
pub struct RequestContext {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: BodyData,
    pub cookies: HashMap<String, String>,
    pub db: Arc<DbService>,
    pub salt: String,
    auth: OnceCell<bool>,
}

impl RequestContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        query: HashMap<String, String>,
        body: BodyData,
        cookies: HashMap<String, String>,
        db: Arc<DbService>,
        salt: impl Into<String>,
    ) -> Self {
        RequestContext {
            method: method.into(),
            path: path.into(),
            query,
            body,
            cookies,
            db,
            salt: salt.into(),
            auth: OnceCell::new(),
        }
    }

    pub fn session_token(&self) -> Option<&str> {
        self.cookies
            .get("session_token")
            .map(String::as_str)
            .filter(|token| !token.is_empty())
    }

    /// True iff the cookie carries a token with an unexpired session row.
    /// Memoized in this context so repeated checks within one request hit the
    /// database once; the cache dies with the request.
    pub async fn is_authenticated(&self) -> Result<bool, AppError> {
        self.auth
            .get_or_try_init(|| async {
                let Some(token) = self.session_token() else {
                    return Ok(false);
                };
                self.db
                    .session_is_active(token, Utc::now().timestamp_millis())
                    .await
            })
            .await
            .copied()
    }
}

/// Resolves the first matching route and runs it. Protected routes
/// short-circuit to 401 before the handler is ever invoked; no match renders
/// the shared 404 page rather than faulting.
pub async fn dispatch(routes: &[Route], ctx: &RequestContext) -> Reply {
    for route in routes {
        let Some(params) = route.pattern.matches(&ctx.method, &ctx.path) else {
            continue;
        };
        if route.protected {
            match ctx.is_authenticated().await {
                Ok(true) => {}
                Ok(false) => {
                    return Reply::json(
                        StatusCode::UNAUTHORIZED,
                        json!({"success": false, "error": "Unauthorized"}),
                    )
                }
                Err(err) => return reply_for_error(err),
            }
        }
        return match (route.handler)(ctx, params).await {
            Ok(reply) => reply,
            Err(err) => reply_for_error(err),
        };
    }
    templates::render_not_found()
}

fn reply_for_error(err: AppError) -> Reply {
    match err {
        AppError::NotFound => templates::render_not_found(),
        err => Reply::json(
            err.status_code(),
            json!({"success": false, "error": err.public_message()}),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_pattern_matches_exactly() {
        let pattern = RoutePattern::parse("GET/contacts/new");
        assert!(pattern.matches("GET", "/contacts/new").is_some());
        assert!(pattern.matches("POST", "/contacts/new").is_none());
        assert!(pattern.matches("GET", "/contacts").is_none());
        assert!(pattern.matches("GET", "/contacts/new/extra").is_none());
    }

    #[test]
    fn named_segments_capture_params() {
        let pattern = RoutePattern::parse("POST/contacts/:id/edit");
        let params = pattern.matches("POST", "/contacts/42/edit").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
        assert!(pattern.matches("POST", "/contacts/42").is_none());
    }

    #[test]
    fn root_pattern_matches_root_only() {
        let pattern = RoutePattern::parse("GET/");
        assert!(pattern.matches("GET", "/").is_some());
        assert!(pattern.matches("GET", "/contacts").is_none());
    }

    #[test]
    fn param_segment_matches_any_value() {
        let pattern = RoutePattern::parse("DELETE/contacts/:id");
        assert!(pattern.matches("DELETE", "/contacts/abc").is_some());
        assert!(pattern.matches("DELETE", "/contacts/7").is_some());
    }
}
