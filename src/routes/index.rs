use crate::router::{HandlerFuture, RequestContext, RouteParams};
use crate::templates;

pub fn home(ctx: &RequestContext, _params: RouteParams) -> HandlerFuture<'_> {
    Box::pin(async move {
        let authenticated = ctx.is_authenticated().await?;
        Ok(templates::render_page(
            "Contacts",
            templates::HOME.to_owned(),
            templates::controls_fragment(authenticated),
        ))
    })
}
