//! One-shot file-log to SQLite migration.
//!
//! Reads `MESSAGES_DIRECTORY` and writes `DB_PATH` (see `Config`). Run it
//! offline: no server may be writing to either backend while it runs.
//! Re-running is safe - already-imported files are skipped by provenance.

use tracing_subscriber::EnvFilter;

use pomchat::Config;
use pomchat_store::{import_file_log, FileLog, SqliteLog};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "pomchat=info".into()),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(
        source = %config.messages_dir.display(),
        dest = %config.db_path.display(),
        "migrating file log to SQLite"
    );

    let source = FileLog::open(&config.messages_dir)?;
    let dest = SqliteLog::open(&config.db_path)?;

    let report = import_file_log(&source, &dest)?;

    for (file, reason) in &report.skipped {
        tracing::warn!(%file, %reason, "could not migrate");
    }
    tracing::info!(
        imported = report.imported,
        duplicates = report.duplicates,
        skipped = report.skipped.len(),
        total = dest.count()?,
        "migration complete"
    );

    Ok(())
}
