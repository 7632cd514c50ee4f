//! Minimal template collaborator: a shared layout plus content partials,
//! rendered from a flat string map. `{{key}}` substitutes HTML-escaped,
//! `{{{key}}}` substitutes raw (for pre-rendered fragments); unknown keys
//! render as empty.

use actix_web::http::StatusCode;

use crate::types::response::Reply;

pub const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{title}}</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css">
</head>
<body>
  <nav class="navbar is-light" role="navigation">
    <div class="navbar-brand"><a class="navbar-item" href="/contacts">Contacts</a></div>
    <div class="navbar-end"><div class="navbar-item">{{{controls}}}</div></div>
  </nav>
  <main class="section"><div class="container">{{{content}}}</div></main>
</body>
</html>
"#;

pub const HOME: &str = r#"<h1 class="title">Contacts</h1>
<p>A small address book. <a href="/contacts">Browse contacts</a> or <a href="/contacts/new">add one</a>.</p>
"#;

pub const NOT_FOUND: &str = r#"<h1 class="title">Not Found</h1>
<p>There is nothing at this address. <a href="/contacts">Back to contacts</a>.</p>
"#;

pub const AUTH_FORM: &str = r#"<h1 class="title">{{heading}}</h1>
<form method="post" action="/auth/{{action}}">
  {{{name_field}}}
  <div class="field"><label class="label">Email</label>
    <input class="input" type="email" name="email" required></div>
  <div class="field"><label class="label">Password</label>
    <input class="input" type="password" name="password" required></div>
  <button class="button is-primary" type="submit">{{heading}}</button>
</form>
<p>{{{switch_link}}}</p>
"#;

pub const CONTACTS_LIST: &str = r#"<h1 class="title">Contacts</h1>
<form method="get" action="/contacts" class="field has-addons">
  <div class="control"><input class="input" type="text" name="q" value="{{q}}" placeholder="First name"></div>
  <div class="control"><button class="button" type="submit">Search</button></div>
</form>
<p><a class="button is-link" href="/contacts/new">New contact</a></p>
<table class="table is-fullwidth">
  <thead><tr><th>First name</th><th>Last name</th><th>Email</th><th>Phone</th><th></th></tr></thead>
  <tbody>{{{rows}}}</tbody>
</table>
"#;

pub const CONTACT_ROW: &str = r#"<tr>
  <td><a href="/contacts/{{id}}">{{first_name}}</a></td>
  <td>{{last_name}}</td><td>{{email}}</td><td>{{phone}}</td>
  <td><a href="/contacts/{{id}}/edit">Edit</a></td>
</tr>
"#;

pub const CONTACT_VIEW: &str = r#"<h1 class="title">{{first_name}} {{last_name}}</h1>
<p>Email: {{email}}</p>
<p>Phone: {{phone}}</p>
<p>
  <a class="button" href="/contacts/{{id}}/edit">Edit</a>
</p>
<form method="post" action="/contacts/{{id}}/delete">
  <button class="button is-danger" type="submit">Delete</button>
</form>
"#;

pub const CONTACT_FORM: &str = r#"<h1 class="title">{{heading}}</h1>
<form method="post" action="/contacts/{{action}}">
  <div class="field"><label class="label">First name</label>
    <input class="input" type="text" name="first_name" value="{{first_name}}"></div>
  <div class="field"><label class="label">Last name</label>
    <input class="input" type="text" name="last_name" value="{{last_name}}"></div>
  <div class="field"><label class="label">Email</label>
    <input class="input" type="email" name="email" value="{{email}}"></div>
  <div class="field"><label class="label">Phone</label>
    <input class="input" type="text" name="phone" value="{{phone}}"></div>
  <button class="button is-primary" type="submit">Save</button>
</form>
"#;

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn lookup<'a>(data: &'a [(&str, String)], key: &str) -> Option<&'a str> {
    data.iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value.as_str())
}

pub fn render(template: &str, data: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        if let Some(raw) = after.strip_prefix('{') {
            if let Some(end) = raw.find("}}}") {
                if let Some(value) = lookup(data, raw[..end].trim()) {
                    out.push_str(value);
                }
                rest = &raw[end + 3..];
                continue;
            }
        } else if let Some(end) = after.find("}}") {
            if let Some(value) = lookup(data, after[..end].trim()) {
                out.push_str(&escape_html(value));
            }
            rest = &after[end + 2..];
            continue;
        }
        // unterminated tag, keep it literal
        out.push_str("{{");
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Auth-state controls fragment, shared by page rendering and the
/// `/auth/controls` partial endpoint.
pub fn controls_fragment(authenticated: bool) -> String {
    if authenticated {
        r#"<a class="button is-primary" href="/auth/logout">Log out</a>"#.to_owned()
    } else {
        r#"<a class="button is-light" href="/auth/login">Log in</a>"#.to_owned()
    }
}

pub fn render_page(title: &str, content: String, controls: String) -> Reply {
    Reply::html(render(
        LAYOUT,
        &[
            ("title", title.to_owned()),
            ("content", content),
            ("controls", controls),
        ],
    ))
}

pub fn render_not_found() -> Reply {
    Reply::html_with_status(
        StatusCode::NOT_FOUND,
        render(
            LAYOUT,
            &[
                ("title", "Not Found".to_owned()),
                ("content", NOT_FOUND.to_owned()),
                ("controls", controls_fragment(false)),
            ],
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaped_tags_neutralize_markup() {
        let html = render("<p>{{name}}</p>", &[("name", "<script>x</script>".to_owned())]);
        assert_eq!(html, "<p>&lt;script&gt;x&lt;/script&gt;</p>");
    }

    #[test]
    fn raw_tags_pass_fragments_through() {
        let html = render("<ul>{{{rows}}}</ul>", &[("rows", "<li>a</li>".to_owned())]);
        assert_eq!(html, "<ul><li>a</li></ul>");
    }

    #[test]
    fn unknown_keys_render_empty() {
        assert_eq!(render("a{{missing}}b", &[]), "ab");
        assert_eq!(render("a{{{missing}}}b", &[]), "ab");
    }

    #[test]
    fn not_found_is_a_404_page() {
        let reply = render_not_found();
        assert_eq!(reply.status().as_u16(), 404);
    }
}
