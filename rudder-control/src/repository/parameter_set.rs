//! Parameter Set Repository
//!
//! Handles all database operations for externally stored parameter sets.
//! Updates go through a version compare-and-swap; a stale version leaves the
//! row untouched and reports zero affected rows.

use rudder_core::domain::parameter::ParameterSet;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// Insert a new parameter set with version 1
pub async fn create(
    pool: &PgPool,
    job_type: String,
    parameters: HashMap<String, serde_json::Value>,
) -> Result<ParameterSet, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = chrono::Utc::now();

    let set = ParameterSet {
        id,
        job_type,
        parameters,
        created_at: now,
        updated_at: now,
        version: 1,
    };

    sqlx::query(
        r#"
        INSERT INTO parameter_sets (id, job_type, parameters, created_at, updated_at, version)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(set.id)
    .bind(&set.job_type)
    .bind(serde_json::to_value(&set.parameters).unwrap_or_default())
    .bind(set.created_at)
    .bind(set.updated_at)
    .bind(set.version)
    .execute(pool)
    .await?;

    Ok(set)
}

/// Find a parameter set by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ParameterSet>, sqlx::Error> {
    let row = sqlx::query_as::<_, ParameterSetRow>(
        r#"
        SELECT id, job_type, parameters, created_at, updated_at, version
        FROM parameter_sets
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// List parameter sets for a job type, newest first
pub async fn find_by_job_type(
    pool: &PgPool,
    job_type: &str,
) -> Result<Vec<ParameterSet>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ParameterSetRow>(
        r#"
        SELECT id, job_type, parameters, created_at, updated_at, version
        FROM parameter_sets
        WHERE job_type = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(job_type)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// Update parameters if the supplied version still matches
///
/// Returns `false` when the row is missing or the version is stale; the
/// caller distinguishes the two with a follow-up lookup.
pub async fn update_with_version(
    pool: &PgPool,
    id: Uuid,
    parameters: &HashMap<String, serde_json::Value>,
    expected_version: i64,
) -> Result<bool, sqlx::Error> {
    let now = chrono::Utc::now();

    let result = sqlx::query(
        r#"
        UPDATE parameter_sets
        SET parameters = $1, updated_at = $2, version = version + 1
        WHERE id = $3 AND version = $4
        "#,
    )
    .bind(serde_json::to_value(parameters).unwrap_or_default())
    .bind(now)
    .bind(id)
    .bind(expected_version)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a parameter set by ID
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM parameter_sets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct ParameterSetRow {
    id: Uuid,
    job_type: String,
    parameters: serde_json::Value,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    version: i64,
}

impl From<ParameterSetRow> for ParameterSet {
    fn from(row: ParameterSetRow) -> Self {
        ParameterSet {
            id: row.id,
            job_type: row.job_type,
            parameters: serde_json::from_value(row.parameters).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
            version: row.version,
        }
    }
}
