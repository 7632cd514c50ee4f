use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{web, App};
use sea_orm::{ConnectOptions, FromQueryResult, Value};

use rolodex::db::query::DEFAULT_LIMIT;
use rolodex::db::DbService;
use rolodex::router::RequestContext;
use rolodex::routes::{configure_routes, AppState};
use rolodex::types::session::Session;
use rolodex::types::user::User;
use rolodex::utils::hash::hash_password;
use rolodex::utils::webutils::BodyData;

pub const TEST_SALT: &str = "test-salt";

pub struct TestContext {
    pub db: Arc<DbService>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        // one pooled connection so the in-memory database is shared
        let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
        options.max_connections(1).min_connections(1);
        let db = DbService::connect(options)
            .await
            .expect("Failed to initialize test database");
        TestContext { db: Arc::new(db) }
    }

    pub fn state(&self) -> AppState {
        AppState {
            db: self.db.clone(),
            salt: TEST_SALT.to_owned(),
        }
    }

    /// Bare request context for driving the router or handlers directly.
    #[allow(dead_code)]
    pub fn request(&self, method: &str, path: &str) -> RequestContext {
        RequestContext::new(
            method,
            path,
            HashMap::new(),
            BodyData::Empty,
            HashMap::new(),
            self.db.clone(),
            TEST_SALT,
        )
    }

    #[allow(dead_code)]
    pub fn request_with_cookies(
        &self,
        method: &str,
        path: &str,
        cookies: &[(&str, &str)],
    ) -> RequestContext {
        let cookies = cookies
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RequestContext::new(
            method,
            path,
            HashMap::new(),
            BodyData::Empty,
            cookies,
            self.db.clone(),
            TEST_SALT,
        )
    }

    #[allow(dead_code)]
    pub async fn create_user(&self, email: &str, password: &str) -> User {
        let rows = self
            .db
            .insert_one(
                "users",
                &[
                    ("email", email.into()),
                    ("name", "Test User".into()),
                    ("password", hash_password(TEST_SALT, password).into()),
                ],
            )
            .await
            .expect("Failed to insert user");
        User::from_query_result(&rows[0], "").expect("Failed to map user row")
    }

    #[allow(dead_code)]
    pub async fn create_session(&self, user_id: i64, token: &str, expires_at_ms: i64) {
        self.db
            .insert_one(
                "users_sessions",
                &[
                    ("user_id", user_id.into()),
                    ("token", token.into()),
                    ("expires_at", expires_at_ms.into()),
                ],
            )
            .await
            .expect("Failed to insert session");
    }

    #[allow(dead_code)]
    pub async fn session_expiry(&self, token: &str) -> Option<i64> {
        let rows = self
            .db
            .query_all(
                "users_sessions",
                &[("token", Value::from(token))],
                DEFAULT_LIMIT,
            )
            .await
            .expect("Failed to query sessions");
        rows.last().map(|row| {
            Session::from_query_result(row, "")
                .expect("Failed to map session row")
                .expires_at
        })
    }
}

#[allow(dead_code)]
pub fn create_app(
    ctx: &TestContext,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ctx.state()))
        .configure(configure_routes)
}

#[allow(dead_code)]
pub fn session_token_from_set_cookie(header: &str) -> String {
    let start = header
        .find("session_token=")
        .expect("Set-Cookie is missing session_token")
        + "session_token=".len();
    let rest = &header[start..];
    rest[..rest.find(';').unwrap_or(rest.len())].to_owned()
}

#[allow(dead_code)]
pub mod test_data {
    pub fn sample_contact() -> Vec<(&'static str, &'static str)> {
        vec![
            ("first_name", "Ada"),
            ("last_name", "Lovelace"),
            ("email", "ada@example.com"),
            ("phone", "555-0100"),
        ]
    }
}
