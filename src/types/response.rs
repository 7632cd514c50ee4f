use actix_web::http::header::{HeaderValue, LOCATION, SET_COOKIE};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder};

/// Everything a route handler can produce. Redirects carry their Location;
/// login/logout attach a Set-Cookie directive on top of whichever kind they
/// return.
#[derive(Debug, Clone)]
pub enum ReplyKind {
    Html(StatusCode, String),
    Json(StatusCode, serde_json::Value),
    Redirect(StatusCode, String),
    NoContent,
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub kind: ReplyKind,
    pub cookie: Option<String>,
}

impl Reply {
    pub fn html(body: impl Into<String>) -> Self {
        Self::html_with_status(StatusCode::OK, body)
    }

    pub fn html_with_status(status: StatusCode, body: impl Into<String>) -> Self {
        Reply {
            kind: ReplyKind::Html(status, body.into()),
            cookie: None,
        }
    }

    pub fn json(status: StatusCode, body: serde_json::Value) -> Self {
        Reply {
            kind: ReplyKind::Json(status, body),
            cookie: None,
        }
    }

    pub fn redirect(status: StatusCode, location: impl Into<String>) -> Self {
        Reply {
            kind: ReplyKind::Redirect(status, location.into()),
            cookie: None,
        }
    }

    pub fn no_content() -> Self {
        Reply {
            kind: ReplyKind::NoContent,
            cookie: None,
        }
    }

    pub fn with_cookie(mut self, directive: impl Into<String>) -> Self {
        self.cookie = Some(directive.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        match &self.kind {
            ReplyKind::Html(status, _) => *status,
            ReplyKind::Json(status, _) => *status,
            ReplyKind::Redirect(status, _) => *status,
            ReplyKind::NoContent => StatusCode::NO_CONTENT,
        }
    }
}

impl Responder for Reply {
    type Body = actix_web::body::BoxBody;

    fn respond_to(self, _: &HttpRequest) -> HttpResponse {
        let mut response = match self.kind {
            ReplyKind::Html(status, body) => HttpResponse::build(status)
                .content_type("text/html")
                .body(body),
            ReplyKind::Json(status, body) => HttpResponse::build(status).json(body),
            ReplyKind::Redirect(status, location) => HttpResponse::build(status)
                .insert_header((LOCATION, location))
                .finish(),
            ReplyKind::NoContent => HttpResponse::NoContent().finish(),
        };
        if let Some(directive) = self.cookie {
            if let Ok(value) = HeaderValue::from_str(&directive) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }
        response
    }
}
