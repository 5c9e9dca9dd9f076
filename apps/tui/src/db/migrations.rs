use color_eyre::eyre::eyre;
use color_eyre::Result;
use sqlx::{migrate::MigrateDatabase, query, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use tracing::{debug, info};

/// Creates the key-value table the fleet store lives in.
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Opens (creating when missing) the SQLite database at `database_url` and
/// prepares its schema.
pub async fn create_database_pool(database_url: &str) -> Result<SqlitePool> {
    info!(%database_url, "initializing database");

    if let Some(path) = extract_db_path_from_url(database_url) {
        if let Some(parent) = std::path::Path::new(&path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!(parent = %parent.display(), "creating database directory");
                std::fs::create_dir_all(parent)
                    .map_err(|e| eyre!("Failed to create database directory: {e}"))?;
            }
        }
    }

    let exists = Sqlite::database_exists(database_url)
        .await
        .map_err(|e| eyre!("Error checking database: {e}"))?;
    if !exists {
        info!("database does not exist, creating it");
        Sqlite::create_database(database_url)
            .await
            .map_err(|e| eyre!("Failed to create SQLite database: {e}"))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _| {
            Box::pin(async move {
                use sqlx::Executor as _;
                conn.execute("PRAGMA journal_mode = WAL;").await?;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
        .map_err(|e| eyre!("Failed to connect to SQLite database: {e}"))?;

    setup_database(&pool)
        .await
        .map_err(|e| eyre!("Failed to set up database schema: {e}"))?;

    info!("database ready");
    Ok(pool)
}

/// Single-connection in-memory pool with the schema applied.
///
/// Every connection to `sqlite::memory:` gets its own database, so the pool
/// must never open a second one.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    setup_database(&pool).await?;
    Ok(pool)
}

/// Filesystem path of a `sqlite://` URL, if it names one.
fn extract_db_path_from_url(url: &str) -> Option<String> {
    let path_part = url.strip_prefix("sqlite://")?;
    let path_part = path_part.split('?').next().unwrap_or(path_part);

    if path_part.starts_with('/') {
        return Some(format!("/{}", path_part.trim_start_matches('/')));
    }
    Some(path_part.to_string())
}
