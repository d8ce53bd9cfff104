use super::db::Db;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The scratchpad is a single record with this id.
pub const SCRATCHPAD_ID: i64 = 1;

const SELECT_SCRATCHPAD: &str = "SELECT id, content, last_modified FROM scratchpad WHERE id = ?1";
const UPSERT_SCRATCHPAD: &str = "INSERT INTO scratchpad (id, content, last_modified) VALUES (?1, ?2, ?3)
    ON CONFLICT(id) DO UPDATE SET content = excluded.content, last_modified = excluded.last_modified";

/// Free-form note kept next to the task lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scratchpad {
    pub id: i64,
    pub content: String,
    pub last_modified: NaiveDateTime,
}

pub struct Scratchpads {
    conn: Connection,
}

impl Scratchpads {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Self { conn: db.conn })
    }

    pub fn open(path: &Path) -> Result<Self> {
        let db = Db::open(path)?;
        Ok(Self { conn: db.conn })
    }

    /// Returns the scratchpad, creating an empty one on first access.
    pub fn get(&mut self) -> Result<Scratchpad> {
        let existing = self
            .conn
            .query_row(SELECT_SCRATCHPAD, params![SCRATCHPAD_ID], |row| {
                Ok(Scratchpad {
                    id: row.get(0)?,
                    content: row.get(1)?,
                    last_modified: row.get(2)?,
                })
            })
            .optional()?;

        match existing {
            Some(scratchpad) => Ok(scratchpad),
            None => self.write(""),
        }
    }

    /// Replaces the content and refreshes the modification time.
    pub fn save(&mut self, content: &str) -> Result<Scratchpad> {
        self.write(content)
    }

    fn write(&mut self, content: &str) -> Result<Scratchpad> {
        let scratchpad = Scratchpad {
            id: SCRATCHPAD_ID,
            content: content.to_string(),
            last_modified: Local::now().naive_local(),
        };
        self.conn.execute(
            UPSERT_SCRATCHPAD,
            params![scratchpad.id, scratchpad.content, scratchpad.last_modified],
        )?;

        Ok(scratchpad)
    }
}
