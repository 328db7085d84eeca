pub mod test_helpers {
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

    use crate::models::Role;

    async fn memory_pool() -> Result<SqlitePool, sqlx::Error> {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
    }

    /// In-memory database with the auth service schema.
    pub async fn create_auth_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = memory_pool().await?;
        sqlx::migrate!("./migrations/auth").run(&pool).await?;
        Ok(pool)
    }

    /// In-memory database with the user service schema.
    pub async fn create_profile_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = memory_pool().await?;
        sqlx::migrate!("./migrations/users").run(&pool).await?;
        Ok(pool)
    }

    /// In-memory database with the payment service schema.
    pub async fn create_payment_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = memory_pool().await?;
        sqlx::migrate!("./migrations/payments").run(&pool).await?;
        Ok(pool)
    }

    /// In-memory database with the order service schema.
    pub async fn create_order_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = memory_pool().await?;
        sqlx::migrate!("./migrations/orders").run(&pool).await?;
        Ok(pool)
    }

    /// Insert a user with a hashed password directly into the auth store.
    pub async fn insert_test_user(
        pool: &SqlitePool,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<i64, sqlx::Error> {
        use argon2::{
            password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
            Argon2,
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                sqlx::Error::Configuration(format!("Password hashing failed: {}", e).into())
            })?
            .to_string();

        let result = sqlx::query(
            "INSERT INTO users (email, password_hash, name, role) VALUES (?, ?, ?, ?)",
        )
        .bind(email)
        .bind(password_hash)
        .bind("Test User")
        .bind(role.as_str())
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
