mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use common::TestContext;
use rolodex::router::{dispatch, HandlerFuture, RequestContext, Route, RouteParams};
use rolodex::types::response::{Reply, ReplyKind};
use serde_json::json;

fn ok_handler(_ctx: &RequestContext, _params: RouteParams) -> HandlerFuture<'_> {
    Box::pin(async { Ok(Reply::no_content()) })
}

fn echo_id(_ctx: &RequestContext, params: RouteParams) -> HandlerFuture<'_> {
    Box::pin(async move { Ok(Reply::html(params.get("id").cloned().unwrap_or_default())) })
}

#[tokio::test]
async fn test_first_match_wins_over_parameterized_sibling() {
    static LITERAL_CALLS: AtomicUsize = AtomicUsize::new(0);
    static PARAM_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn literal(_ctx: &RequestContext, _params: RouteParams) -> HandlerFuture<'_> {
        Box::pin(async {
            LITERAL_CALLS.fetch_add(1, Ordering::SeqCst);
            Ok(Reply::no_content())
        })
    }
    fn by_id(_ctx: &RequestContext, _params: RouteParams) -> HandlerFuture<'_> {
        Box::pin(async {
            PARAM_CALLS.fetch_add(1, Ordering::SeqCst);
            Ok(Reply::no_content())
        })
    }

    let ctx = TestContext::new().await;
    let routes = vec![
        Route::new("GET/contacts/new", literal),
        Route::new("GET/contacts/:id", by_id),
    ];

    let request = ctx.request("GET", "/contacts/new");
    dispatch(&routes, &request).await;

    assert_eq!(LITERAL_CALLS.load(Ordering::SeqCst), 1);
    assert_eq!(PARAM_CALLS.load(Ordering::SeqCst), 0);

    // the parameterized sibling still handles everything else
    let request = ctx.request("GET", "/contacts/42");
    dispatch(&routes, &request).await;
    assert_eq!(PARAM_CALLS.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_protected_route_never_reaches_the_handler() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);

    fn secret(_ctx: &RequestContext, _params: RouteParams) -> HandlerFuture<'_> {
        Box::pin(async {
            CALLS.fetch_add(1, Ordering::SeqCst);
            Ok(Reply::no_content())
        })
    }

    let ctx = TestContext::new().await;
    let routes = vec![Route::protected("GET/secret", secret)];

    let request = ctx.request("GET", "/secret");
    let reply = dispatch(&routes, &request).await;

    assert_eq!(reply.status().as_u16(), 401);
    match reply.kind {
        ReplyKind::Json(_, body) => {
            assert_eq!(body, json!({"success": false, "error": "Unauthorized"}))
        }
        other => panic!("expected a JSON reply, got {other:?}"),
    }
    assert_eq!(CALLS.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_protected_route_runs_with_a_live_session() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("a@b.com", "pw").await;
    ctx.create_session(user.id, "tok-router", Utc::now().timestamp_millis() + 60_000)
        .await;

    let routes = vec![Route::protected("GET/secret", ok_handler)];
    let request =
        ctx.request_with_cookies("GET", "/secret", &[("session_token", "tok-router")]);
    let reply = dispatch(&routes, &request).await;
    assert_eq!(reply.status().as_u16(), 204);
}

#[tokio::test]
async fn test_extracted_params_reach_the_handler() {
    let ctx = TestContext::new().await;
    let routes = vec![Route::new("GET/contacts/:id", echo_id)];

    let request = ctx.request("GET", "/contacts/42");
    let reply = dispatch(&routes, &request).await;
    match reply.kind {
        ReplyKind::Html(_, body) => assert_eq!(body, "42"),
        other => panic!("expected an HTML reply, got {other:?}"),
    }
}

#[tokio::test]
async fn test_no_match_falls_through_to_404_html() {
    let ctx = TestContext::new().await;
    let routes = vec![Route::new("GET/contacts", ok_handler)];

    let request = ctx.request("POST", "/contacts");
    let reply = dispatch(&routes, &request).await;
    assert_eq!(reply.status().as_u16(), 404);
    assert!(matches!(reply.kind, ReplyKind::Html(_, _)));
}
