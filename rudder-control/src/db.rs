use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Create executions table
    //
    // Rows are written by the job engine; Rudder only reads them.
    // `parent_id`/`link_kind` encode the continuation tree: 'success' and
    // 'failure' continuations plus 'item' rows for batch children.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS executions (
            id UUID PRIMARY KEY,
            job_type VARCHAR(255) NOT NULL,
            display_name VARCHAR(255) NOT NULL,
            status VARCHAR(50) NOT NULL,
            started_at TIMESTAMPTZ,
            finished_at TIMESTAMPTZ,
            parameters JSONB NOT NULL DEFAULT '{}',
            metadata JSONB NOT NULL DEFAULT '{}',
            batch_total BIGINT,
            parent_id UUID REFERENCES executions(id) ON DELETE CASCADE,
            link_kind VARCHAR(20)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create parameter_sets table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS parameter_sets (
            id UUID PRIMARY KEY,
            job_type VARCHAR(255) NOT NULL,
            parameters JSONB NOT NULL DEFAULT '{}',
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL,
            version BIGINT NOT NULL DEFAULT 1
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for better query performance
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_executions_parent ON executions(parent_id, link_kind)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_executions_status ON executions(status)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_parameter_sets_job_type ON parameter_sets(job_type)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_parameter_sets_created_at ON parameter_sets(created_at DESC)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_parameter_sets_updated_at ON parameter_sets(updated_at DESC)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
