use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS trade_records (
            id TEXT NOT NULL,
            owner TEXT NOT NULL,
            visibility TEXT NOT NULL,
            emotion TEXT NOT NULL,
            color TEXT NOT NULL,
            emoji TEXT NOT NULL,
            symbol TEXT NOT NULL DEFAULT '',
            instrument TEXT NOT NULL DEFAULT '',
            session TEXT NOT NULL DEFAULT '',
            strategy TEXT NOT NULL DEFAULT '',
            entry_point REAL NOT NULL DEFAULT 0,
            exit_point REAL NOT NULL DEFAULT 0,
            position_size REAL NOT NULL DEFAULT 0,
            profit_loss REAL NOT NULL DEFAULT 0,
            reason TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            tags TEXT NOT NULL DEFAULT '[]',
            date TEXT NOT NULL DEFAULT '',
            time TEXT NOT NULL DEFAULT '',
            PRIMARY KEY (visibility, owner, id)
        );

        CREATE INDEX IF NOT EXISTS idx_trade_records_owner ON trade_records(owner, visibility);
        "
    ).map_err(|e| format!("Migration failed: {e}"))
}
