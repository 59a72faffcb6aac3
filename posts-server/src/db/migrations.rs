//! Schema for the posts table
//!
//! Idempotent: every statement is `IF NOT EXISTS`, so running it on each
//! startup is safe.

use sqlx::PgPool;

/// Create the posts table if it is missing.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running posts migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
            title TEXT NOT NULL,
            body TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Posts migrations complete");
    Ok(())
}
