use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

/// Open a SQLite pool for a service. Each service owns its own database file,
/// configured through its `*_DATABASE_URL` environment variable.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the data directory exists
    if let Some(parent) = std::path::Path::new(&database_url.replace("sqlite://", "")).parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}
