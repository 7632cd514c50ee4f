use sea_orm::{DbBackend, Value};

/// Column name paired with the value bound for it. Column and table names come
/// from trusted call sites; values are always bound, never interpolated.
pub type Field<'a> = (&'a str, Value);

pub const DEFAULT_LIMIT: usize = 1000;

fn placeholder(backend: DbBackend, idx: usize) -> String {
    match backend {
        DbBackend::Postgres => format!("${idx}"),
        _ => "?".to_owned(),
    }
}

/// `INSERT INTO table (cols) VALUES (placeholders) RETURNING *`, params in
/// field-iteration order.
pub fn insert(backend: DbBackend, table: &str, fields: &[Field]) -> (String, Vec<Value>) {
    let cols: Vec<&str> = fields.iter().map(|(col, _)| *col).collect();
    let marks: Vec<String> = (1..=fields.len())
        .map(|i| placeholder(backend, i))
        .collect();
    let sql = format!(
        "INSERT INTO {table} ({}) VALUES ({}) RETURNING *",
        cols.join(", "),
        marks.join(", ")
    );
    (sql, fields.iter().map(|(_, v)| v.clone()).collect())
}

/// `UPDATE table SET col = ?, ... WHERE id_col = ? RETURNING *`, params are
/// the field values followed by the id value.
pub fn update(
    backend: DbBackend,
    table: &str,
    fields: &[Field],
    id: Field,
) -> (String, Vec<Value>) {
    let sets: Vec<String> = fields
        .iter()
        .enumerate()
        .map(|(i, (col, _))| format!("{col} = {}", placeholder(backend, i + 1)))
        .collect();
    let sql = format!(
        "UPDATE {table} SET {} WHERE {} = {} RETURNING *",
        sets.join(", "),
        id.0,
        placeholder(backend, fields.len() + 1)
    );
    let mut params: Vec<Value> = fields.iter().map(|(_, v)| v.clone()).collect();
    params.push(id.1);
    (sql, params)
}

/// `SELECT * FROM table [WHERE col = ? AND ...] LIMIT n`. An empty filter list
/// omits the WHERE clause entirely. Only equality filters are supported.
pub fn select_all(
    backend: DbBackend,
    table: &str,
    filters: &[Field],
    limit: usize,
) -> (String, Vec<Value>) {
    let mut sql = format!("SELECT * FROM {table}");
    if !filters.is_empty() {
        let conds: Vec<String> = filters
            .iter()
            .enumerate()
            .map(|(i, (col, _))| format!("{col} = {}", placeholder(backend, i + 1)))
            .collect();
        sql.push_str(&format!(" WHERE {}", conds.join(" AND ")));
    }
    sql.push_str(&format!(" LIMIT {limit}"));
    (sql, filters.iter().map(|(_, v)| v.clone()).collect())
}

/// `DELETE FROM table WHERE id_col = ? RETURNING *`.
pub fn delete_by_id(backend: DbBackend, table: &str, id: Field) -> (String, Vec<Value>) {
    let sql = format!(
        "DELETE FROM {table} WHERE {} = {} RETURNING *",
        id.0,
        placeholder(backend, 1)
    );
    (sql, vec![id.1])
}
