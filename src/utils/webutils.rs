use std::collections::HashMap;

/// Request body, parsed by Content-Type. Unrecognized content types are
/// carried opaquely rather than rejected.
#[derive(Debug, Clone)]
pub enum BodyData {
    Json(serde_json::Value),
    Form(HashMap<String, String>),
    Text(String),
    Opaque,
    Empty,
}

impl BodyData {
    /// String field lookup that works the same over JSON and form bodies.
    pub fn field(&self, name: &str) -> Option<String> {
        match self {
            BodyData::Json(value) => value.get(name)?.as_str().map(str::to_owned),
            BodyData::Form(map) => map.get(name).cloned(),
            _ => None,
        }
    }
}

pub fn decode_all(input: &str) -> Option<String> {
    urlencoding::decode(input).ok().map(|cow| cow.into_owned())
}

/// Reads the body the way the surface accepts it: JSON, form-encoded, or raw
/// text, keyed off Content-Type. Anything else (files, binary) stays opaque.
pub fn read_request_body(content_type: &str, bytes: &[u8]) -> BodyData {
    if bytes.is_empty() {
        return BodyData::Empty;
    }
    if content_type.contains("application/json") {
        return match serde_json::from_slice(bytes) {
            Ok(value) => BodyData::Json(value),
            Err(_) => BodyData::Opaque,
        };
    }
    if content_type.contains("form") {
        return BodyData::Form(parse_pairs(&String::from_utf8_lossy(bytes), '&'));
    }
    if content_type.contains("application/text") || content_type.contains("text/") {
        return BodyData::Text(String::from_utf8_lossy(bytes).into_owned());
    }
    BodyData::Opaque
}

pub fn parse_query(raw: &str) -> HashMap<String, String> {
    parse_pairs(raw, '&')
}

/// `Cookie: a=1; b=2` into a map. Values keep their raw form.
pub fn parse_cookies(header: &str) -> HashMap<String, String> {
    header
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            Some((key.trim().to_owned(), value.trim().to_owned()))
        })
        .collect()
}

fn parse_pairs(raw: &str, separator: char) -> HashMap<String, String> {
    raw.split(separator)
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            let key = decode_all(key.trim())?;
            let value = decode_all(&value.replace('+', " "))?;
            Some((key, value))
        })
        .collect()
}
