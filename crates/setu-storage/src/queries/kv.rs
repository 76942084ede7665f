// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key/value operations on the `kv_store` table.

use rusqlite::{OptionalExtension, params};
use setu_core::SetuError;

use crate::database::{Database, map_tr_err};

/// Reads the value stored under `key`.
pub async fn get(db: &Database, key: &str) -> Result<Option<String>, SetuError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Inserts or replaces the value under `key`.
pub async fn put(db: &Database, key: &str, value: &str) -> Result<(), SetuError> {
    let key = key.to_string();
    let value = value.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, value],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Removes `key`. Returns whether a row was deleted.
pub async fn delete(db: &Database, key: &str) -> Result<bool, SetuError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            let affected = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
            Ok(affected > 0)
        })
        .await
        .map_err(map_tr_err)
}
