use crate::Database;
use crate::models::{HistoryRow, MessageRow, UserRow};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Users --

    pub fn create_user(&self, id: &str, name: &str, password_hash: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, name, password) VALUES (?1, ?2, ?3)",
                (id, name, password_hash),
            )?;
            Ok(())
        })
    }

    /// Insert a user unless the name is already taken.
    /// Returns true when a row was inserted. Existing users are never modified.
    pub fn ensure_user(&self, id: &str, name: &str, password_hash: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO users (id, name, password) VALUES (?1, ?2, ?3)",
                (id, name, password_hash),
            )?;
            Ok(inserted > 0)
        })
    }

    pub fn get_user_by_name(&self, name: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_name(conn, name))
    }

    // -- Messages --

    pub fn insert_message(&self, text: &str, author_id: &str) -> Result<MessageRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (text, author_id) VALUES (?1, ?2)",
                (text, author_id),
            )?;
            let id = conn.last_insert_rowid();

            let row = conn.query_row(
                "SELECT id, text, author_id, created_at FROM messages WHERE id = ?1",
                [id],
                |row| {
                    Ok(MessageRow {
                        id: row.get(0)?,
                        text: row.get(1)?,
                        author_id: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )?;
            Ok(row)
        })
    }

    /// The `limit` most recent messages across all authors, newest first.
    pub fn get_recent_messages(&self, limit: u64) -> Result<Vec<HistoryRow>> {
        self.with_conn(|conn| query_recent_messages(conn, limit))
    }
}

fn query_user_by_name(conn: &Connection, name: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, name, password, created_at FROM users WHERE name = ?1")?;

    let row = stmt
        .query_row([name], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                name: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_recent_messages(conn: &Connection, limit: u64) -> Result<Vec<HistoryRow>> {
    // SQLite LIMIT is a signed 64-bit value
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let mut stmt = conn.prepare(
        "SELECT m.text, u.name
         FROM messages m
         JOIN users u ON m.author_id = u.id
         ORDER BY m.id DESC
         LIMIT ?1",
    )?;

    let rows = stmt
        .query_map([limit], |row| {
            Ok(HistoryRow {
                text: row.get(0)?,
                author_name: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
