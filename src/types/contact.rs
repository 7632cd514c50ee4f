use sea_orm::{FromQueryResult, Value};
use serde::Serialize;

use crate::utils::webutils::BodyData;

#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct Contact {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

const FORM_COLUMNS: [&str; 4] = ["first_name", "last_name", "email", "phone"];

/// Picks the known contact columns out of a request body, in column order.
/// Anything else in the body is ignored; missing columns are simply omitted
/// so partial updates only touch what was sent.
pub fn contact_fields(body: &BodyData) -> Vec<(&'static str, Value)> {
    FORM_COLUMNS
        .iter()
        .filter_map(|col| body.field(col).map(|value| (*col, Value::from(value))))
        .collect()
}
