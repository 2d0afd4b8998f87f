//! SQLite persistence for memories.
//!
//! Functions take an explicit connection and run without a transaction.
//! Authorization is not checked here; the HTTP handlers decide who may call what.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::types::{Memory, MemoryDraft};
use super::{StoreError, StoreResult};

const MEMORY_COLUMNS: &str = "id, content, cover_url, is_public, user_id, created_at";

/// Insert a new memory owned by `user_id`. Returns the stored record.
pub fn create_memory(conn: &Connection, user_id: &str, draft: &MemoryDraft) -> StoreResult<Memory> {
    let memory = Memory {
        id: uuid::Uuid::new_v4().to_string(),
        content: draft.content.clone(),
        cover_url: draft.cover_url.clone(),
        is_public: draft.is_public,
        user_id: user_id.to_string(),
        // Stored with millisecond precision, so the returned value matches a later read
        created_at: Utc::now().trunc_subsecs(3),
    };

    conn.execute(
        "INSERT INTO memories (id, content, cover_url, is_public, user_id, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            memory.id,
            memory.content,
            memory.cover_url,
            memory.is_public,
            memory.user_id,
            format_timestamp(&memory.created_at),
        ],
    )?;

    Ok(memory)
}

/// Look up a memory by ID. Fails with [`StoreError::NotFound`] if absent.
pub fn get_memory(conn: &Connection, id: &str) -> StoreResult<Memory> {
    find_memory(conn, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))
}

/// Look up a memory by ID, returning `None` if absent.
pub fn find_memory(conn: &Connection, id: &str) -> StoreResult<Option<Memory>> {
    let raw = conn
        .query_row(
            &format!("SELECT {MEMORY_COLUMNS} FROM memories WHERE id = ?1"),
            params![id],
            MemoryRow::from_row,
        )
        .optional()?;

    raw.map(MemoryRow::into_memory).transpose()
}

/// All memories owned by `user_id`, oldest first.
pub fn list_memories(conn: &Connection, user_id: &str) -> StoreResult<Vec<Memory>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MEMORY_COLUMNS} FROM memories WHERE user_id = ?1 ORDER BY created_at ASC, rowid ASC"
    ))?;

    let rows = stmt
        .query_map(params![user_id], MemoryRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter().map(MemoryRow::into_memory).collect()
}

/// Replace content, cover URL and visibility of an existing memory.
/// ID, owner and creation time are left untouched.
pub fn update_memory(conn: &Connection, id: &str, draft: &MemoryDraft) -> StoreResult<Memory> {
    let rows = conn.execute(
        "UPDATE memories SET content = ?1, cover_url = ?2, is_public = ?3 WHERE id = ?4",
        params![draft.content, draft.cover_url, draft.is_public, id],
    )?;
    if rows == 0 {
        return Err(StoreError::NotFound(id.to_string()));
    }

    get_memory(conn, id)
}

/// Permanently remove a memory.
pub fn delete_memory(conn: &Connection, id: &str) -> StoreResult<()> {
    let rows = conn.execute("DELETE FROM memories WHERE id = ?1", params![id])?;
    if rows == 0 {
        return Err(StoreError::NotFound(id.to_string()));
    }
    Ok(())
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ── Internal row struct ───────────────────────────────────────────────────────

struct MemoryRow {
    id: String,
    content: String,
    cover_url: String,
    is_public: bool,
    user_id: String,
    created_at: String,
}

impl MemoryRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            content: row.get(1)?,
            cover_url: row.get(2)?,
            is_public: row.get(3)?,
            user_id: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn into_memory(self) -> StoreResult<Memory> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| StoreError::Corrupt {
                id: self.id.clone(),
                reason: format!("bad created_at {:?}: {e}", self.created_at),
            })?
            .with_timezone(&Utc);

        Ok(Memory {
            id: self.id,
            content: self.content,
            cover_url: self.cover_url,
            is_public: self.is_public,
            user_id: self.user_id,
            created_at,
        })
    }
}
