use actix_web::http::StatusCode;
use chrono::{Duration, Utc};
use sea_orm::FromQueryResult;
use serde_json::json;
use tracing::info;

use crate::db::query::DEFAULT_LIMIT;
use crate::router::{HandlerFuture, RequestContext, RouteParams};
use crate::templates;
use crate::types::error::AppError;
use crate::types::response::Reply;
use crate::types::user::User;
use crate::utils::hash::{hash_password, new_session_token};

const SESSION_DAYS: i64 = 7;

/// Clears the cookie client-side regardless of whether a session row matched.
const CLEAR_SESSION_COOKIE: &str =
    "session_token=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT; SameSite=Strict; Secure; HttpOnly";

/// `GET /auth/register` and `GET /auth/login` share one view; the path tail
/// decides which form is shown.
pub fn auth_view(ctx: &RequestContext, _params: RouteParams) -> HandlerFuture<'_> {
    Box::pin(async move {
        let is_register = ctx.path.ends_with("/register");
        let action = if is_register { "register" } else { "login" };
        let heading = if is_register { "Register" } else { "Log in" };
        let name_field = if is_register {
            r#"<div class="field"><label class="label">Name</label>
    <input class="input" type="text" name="name"></div>"#
        } else {
            ""
        };
        let switch_link = if is_register {
            r#"Already have an account? <a href="/auth/login">Log in</a>"#
        } else {
            r#"No account yet? <a href="/auth/register">Register</a>"#
        };
        let content = templates::render(
            templates::AUTH_FORM,
            &[
                ("heading", heading.to_owned()),
                ("action", action.to_owned()),
                ("name_field", name_field.to_owned()),
                ("switch_link", switch_link.to_owned()),
            ],
        );
        Ok(templates::render_page(
            heading,
            content,
            templates::controls_fragment(false),
        ))
    })
}

/// Partial HTML for the auth controls, swapped by client-side includes.
pub fn controls(ctx: &RequestContext, _params: RouteParams) -> HandlerFuture<'_> {
    Box::pin(async move {
        let authenticated = ctx.is_authenticated().await?;
        Ok(Reply::html(templates::controls_fragment(authenticated)))
    })
}

pub fn register(ctx: &RequestContext, _params: RouteParams) -> HandlerFuture<'_> {
    Box::pin(async move {
        let email = ctx.body.field("email").unwrap_or_default();
        let name = ctx.body.field("name").unwrap_or_default();
        let password = ctx.body.field("password").unwrap_or_default();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation("email and password are required".into()));
        }

        let digest = hash_password(&ctx.salt, &password);
        let inserted = ctx
            .db
            .insert_one(
                "users",
                &[
                    ("email", email.clone().into()),
                    ("name", name.into()),
                    ("password", digest.into()),
                ],
            )
            .await;

        match inserted {
            Ok(_) => Ok(Reply::redirect(StatusCode::SEE_OTHER, "/auth/login")),
            // duplicate email lands here too; the body stays generic
            Err(_) => {
                info!(%email, "registration failed");
                Ok(Reply::json(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"success": false, "errors": "Couldn't create user"}),
                ))
            }
        }
    })
}

pub fn login(ctx: &RequestContext, _params: RouteParams) -> HandlerFuture<'_> {
    Box::pin(async move {
        let email = ctx.body.field("email").unwrap_or_default();
        let password = ctx.body.field("password").unwrap_or_default();
        let digest = hash_password(&ctx.salt, &password);

        // Lookup by email+digest; the response never says which one was wrong.
        let rows = ctx
            .db
            .query_all(
                "users",
                &[("email", email.clone().into()), ("password", digest.into())],
                DEFAULT_LIMIT,
            )
            .await?;

        let Some(row) = rows.into_iter().last() else {
            info!(%email, "authentication failed");
            return Ok(Reply::json(
                StatusCode::BAD_REQUEST,
                json!({"success": false, "errors": "Unknown user or incorrect password"}),
            ));
        };
        let user = User::from_query_result(&row, "")?;

        let token = new_session_token(&ctx.salt);
        let expiration = Utc::now() + Duration::days(SESSION_DAYS);
        ctx.db
            .insert_one(
                "users_sessions",
                &[
                    ("user_id", user.id.into()),
                    ("token", token.clone().into()),
                    ("expires_at", expiration.timestamp_millis().into()),
                ],
            )
            .await?;

        let cookie = format!(
            "session_token={token}; Path=/; Expires={}; SameSite=Strict; Secure; HttpOnly",
            expiration.format("%a, %d %b %Y %H:%M:%S GMT")
        );
        Ok(Reply::redirect(StatusCode::FOUND, "/").with_cookie(cookie))
    })
}

/// Soft logout: the session row is kept for audit and its expiry rewound to
/// epoch 0. Safe to repeat with an already-expired token.
pub fn logout(ctx: &RequestContext, _params: RouteParams) -> HandlerFuture<'_> {
    Box::pin(async move {
        if let Some(token) = ctx.session_token() {
            ctx.db
                .update_one(
                    "users_sessions",
                    &[("expires_at", 0i64.into())],
                    ("token", token.into()),
                )
                .await?;
        }
        Ok(Reply::redirect(StatusCode::FOUND, "/").with_cookie(CLEAR_SESSION_COOKIE))
    })
}
