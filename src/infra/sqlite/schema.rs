use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign key enforcement")?;
    Ok(conn)
}

pub fn init_db(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS admin (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            username      TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            salt          TEXT NOT NULL,
            created_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS election (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            starts_at   TEXT NOT NULL,
            ends_at     TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS position (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            election_id INTEGER NOT NULL,
            name        TEXT NOT NULL,
            max_votes   INTEGER NOT NULL DEFAULT 1,
            sort_order  INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (election_id) REFERENCES election(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS candidate (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            election_id INTEGER NOT NULL,
            position_id INTEGER NOT NULL,
            name        TEXT NOT NULL,
            party       TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (election_id) REFERENCES election(id) ON DELETE CASCADE,
            FOREIGN KEY (position_id) REFERENCES position(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS voting_code (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            election_id INTEGER NOT NULL,
            code        TEXT NOT NULL UNIQUE,
            used_at     TEXT,
            created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (election_id) REFERENCES election(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS vote (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            voting_code_id INTEGER NOT NULL,
            candidate_id   INTEGER NOT NULL,
            position_id    INTEGER NOT NULL,
            cast_at        TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (voting_code_id) REFERENCES voting_code(id) ON DELETE CASCADE,
            FOREIGN KEY (candidate_id) REFERENCES candidate(id) ON DELETE CASCADE,
            FOREIGN KEY (position_id) REFERENCES position(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_position_election
            ON position(election_id);

        CREATE INDEX IF NOT EXISTS idx_candidate_position
            ON candidate(position_id);

        CREATE INDEX IF NOT EXISTS idx_voting_code_election
            ON voting_code(election_id);

        CREATE INDEX IF NOT EXISTS idx_vote_candidate
            ON vote(candidate_id);
        ",
    )
    .context("failed to initialize schema")?;

    Ok(())
}
