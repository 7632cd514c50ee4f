use actix_web::http::header::{CONTENT_TYPE, COOKIE};
use actix_web::{web, HttpRequest};
use std::sync::Arc;

use crate::db::DbService;
use crate::router::{self, RequestContext, Route};
use crate::types::response::Reply;
use crate::utils::webutils;

pub mod auth;
pub mod contacts;
pub mod index;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbService>,
    pub salt: String,
}

/// The routing table, in match order. First match wins, so literal paths sit
/// above their parameterized siblings (`/contacts/new` before `/contacts/:id`).
pub fn route_table() -> Vec<Route> {
    vec![
        Route::new("GET/", index::home),
        Route::new("GET/auth/register", auth::auth_view),
        Route::new("GET/auth/login", auth::auth_view),
        Route::new("GET/auth/controls", auth::controls),
        Route::new("POST/auth/register", auth::register),
        Route::new("POST/auth/login", auth::login),
        Route::protected("GET/auth/logout", auth::logout),
        Route::new("GET/contacts", contacts::list),
        Route::new("GET/contacts/new", contacts::new_form),
        Route::new("GET/contacts/:id", contacts::view),
        Route::protected("GET/contacts/:id/edit", contacts::edit_form),
        Route::new("POST/contacts/new", contacts::create),
        Route::protected("POST/contacts/:id/edit", contacts::update),
        Route::new("POST/contacts/:id/delete", contacts::delete),
        Route::new("DELETE/contacts/:id", contacts::delete),
    ]
}

/// Single catch-all service: every request funnels through the ordered
/// pattern list above instead of the framework's own route tree.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.default_service(web::route().to(handle));
}

async fn handle(req: HttpRequest, body: web::Bytes, state: web::Data<AppState>) -> Reply {
    let ctx = build_context(&req, &body, &state);
    router::dispatch(&route_table(), &ctx).await
}

fn build_context(req: &HttpRequest, body: &web::Bytes, state: &AppState) -> RequestContext {
    let header = |name| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
    };
    RequestContext::new(
        req.method().as_str(),
        req.path(),
        webutils::parse_query(req.query_string()),
        webutils::read_request_body(header(CONTENT_TYPE), body),
        webutils::parse_cookies(header(COOKIE)),
        state.db.clone(),
        state.salt.clone(),
    )
}
