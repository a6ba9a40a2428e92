/// Database row types. These map directly to SQLite rows.

pub struct UserRow {
    pub id: String,
    pub name: String,
    pub password: String,
    pub created_at: String,
}

pub struct MessageRow {
    pub id: i64,
    pub text: String,
    pub author_id: String,
    pub created_at: String,
}

/// A message joined with its author's name, as returned by history queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub text: String,
    pub author_name: String,
}
