use actix_web::http::StatusCode;
use sea_orm::{FromQueryResult, Value};

use crate::db::query::DEFAULT_LIMIT;
use crate::router::{HandlerFuture, RequestContext, RouteParams};
use crate::templates;
use crate::types::contact::{contact_fields, Contact};
use crate::types::error::AppError;
use crate::types::response::Reply;

fn id_param(params: &RouteParams) -> Result<i64, AppError> {
    params
        .get("id")
        .and_then(|raw| raw.parse().ok())
        .ok_or(AppError::NotFound)
}

async fn find_contact(ctx: &RequestContext, id: i64) -> Result<Contact, AppError> {
    let rows = ctx
        .db
        .query_all("contacts", &[("id", Value::from(id))], DEFAULT_LIMIT)
        .await?;
    let row = rows.into_iter().last().ok_or(AppError::NotFound)?;
    Ok(Contact::from_query_result(&row, "")?)
}

fn field_or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// `GET /contacts[?q=]`. `q` is an exact, case-sensitive first-name filter.
pub fn list(ctx: &RequestContext, _params: RouteParams) -> HandlerFuture<'_> {
    Box::pin(async move {
        let q = ctx.query.get("q").cloned();
        let filters: Vec<(&str, Value)> = match &q {
            Some(q) => vec![("first_name", Value::from(q.clone()))],
            None => Vec::new(),
        };
        let rows = ctx.db.query_all("contacts", &filters, DEFAULT_LIMIT).await?;

        let mut fragments = String::new();
        for row in &rows {
            let contact = Contact::from_query_result(row, "")?;
            fragments.push_str(&templates::render(
                templates::CONTACT_ROW,
                &[
                    ("id", contact.id.to_string()),
                    ("first_name", field_or_empty(&contact.first_name)),
                    ("last_name", field_or_empty(&contact.last_name)),
                    ("email", field_or_empty(&contact.email)),
                    ("phone", field_or_empty(&contact.phone)),
                ],
            ));
        }

        let content = templates::render(
            templates::CONTACTS_LIST,
            &[("q", q.unwrap_or_default()), ("rows", fragments)],
        );
        let authenticated = ctx.is_authenticated().await?;
        Ok(templates::render_page(
            "Contacts",
            content,
            templates::controls_fragment(authenticated),
        ))
    })
}

pub fn new_form(ctx: &RequestContext, _params: RouteParams) -> HandlerFuture<'_> {
    Box::pin(async move {
        let content = templates::render(
            templates::CONTACT_FORM,
            &[
                ("heading", "New contact".to_owned()),
                ("action", "new".to_owned()),
            ],
        );
        let authenticated = ctx.is_authenticated().await?;
        Ok(templates::render_page(
            "New contact",
            content,
            templates::controls_fragment(authenticated),
        ))
    })
}

pub fn view(ctx: &RequestContext, params: RouteParams) -> HandlerFuture<'_> {
    Box::pin(async move {
        let id = id_param(&params)?;
        let contact = find_contact(ctx, id).await?;
        let content = templates::render(
            templates::CONTACT_VIEW,
            &[
                ("id", contact.id.to_string()),
                ("first_name", field_or_empty(&contact.first_name)),
                ("last_name", field_or_empty(&contact.last_name)),
                ("email", field_or_empty(&contact.email)),
                ("phone", field_or_empty(&contact.phone)),
            ],
        );
        let authenticated = ctx.is_authenticated().await?;
        Ok(templates::render_page(
            "Contact",
            content,
            templates::controls_fragment(authenticated),
        ))
    })
}

pub fn edit_form(ctx: &RequestContext, params: RouteParams) -> HandlerFuture<'_> {
    Box::pin(async move {
        let id = id_param(&params)?;
        let contact = find_contact(ctx, id).await?;
        let content = templates::render(
            templates::CONTACT_FORM,
            &[
                ("heading", "Edit contact".to_owned()),
                ("action", format!("{id}/edit")),
                ("first_name", field_or_empty(&contact.first_name)),
                ("last_name", field_or_empty(&contact.last_name)),
                ("email", field_or_empty(&contact.email)),
                ("phone", field_or_empty(&contact.phone)),
            ],
        );
        Ok(templates::render_page(
            "Edit contact",
            content,
            templates::controls_fragment(true),
        ))
    })
}

pub fn create(ctx: &RequestContext, _params: RouteParams) -> HandlerFuture<'_> {
    Box::pin(async move {
        let fields = contact_fields(&ctx.body);
        if fields.is_empty() {
            return Err(AppError::Validation("no contact fields provided".into()));
        }
        ctx.db.insert_one("contacts", &fields).await?;
        Ok(Reply::redirect(StatusCode::SEE_OTHER, "/contacts"))
    })
}

pub fn update(ctx: &RequestContext, params: RouteParams) -> HandlerFuture<'_> {
    Box::pin(async move {
        let id = id_param(&params)?;
        let fields = contact_fields(&ctx.body);
        if fields.is_empty() {
            return Err(AppError::Validation("no contact fields provided".into()));
        }
        ctx.db
            .update_one("contacts", &fields, ("id", Value::from(id)))
            .await?;
        Ok(Reply::redirect(StatusCode::SEE_OTHER, "/contacts"))
    })
}

/// Serves both `DELETE /contacts/:id` and the form-friendly
/// `POST /contacts/:id/delete`.
pub fn delete(ctx: &RequestContext, params: RouteParams) -> HandlerFuture<'_> {
    Box::pin(async move {
        let id = id_param(&params)?;
        ctx.db
            .delete_by_id("contacts", ("id", Value::from(id)))
            .await?;
        Ok(Reply::redirect(StatusCode::SEE_OTHER, "/contacts"))
    })
}
