//! Idempotent schema setup for the `tutors` and `clients` tables
//!
//! Base tables are created with the full column set. Optional columns
//! are then re-asserted one by one so tables created by older releases
//! pick them up. Only base table creation is fatal.

use sqlx::PgPool;

use super::pool::Storage;

/// Schema errors, fatal at startup
#[derive(Debug, thiserror::Error)]
#[error("failed to create table {table}: {source}")]
pub struct SchemaError {
    pub table: &'static str,
    #[source]
    pub source: sqlx::Error,
}

const CREATE_TUTORS: &str = r#"
    CREATE TABLE IF NOT EXISTS tutors (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255),
        subjects TEXT[] NOT NULL DEFAULT '{}',
        pay DOUBLE PRECISION NOT NULL,
        rating DOUBLE PRECISION NOT NULL DEFAULT 5.0,
        bio TEXT NOT NULL DEFAULT '',
        language TEXT,
        location TEXT,
        availability TEXT,
        experience TEXT,
        education TEXT,
        certification TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

const CREATE_CLIENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS clients (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255),
        subjects TEXT[] NOT NULL DEFAULT '{}',
        budget DOUBLE PRECISION NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        language TEXT,
        location TEXT,
        availability TEXT,
        education TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

/// Optional tutor columns: (name, type)
const TUTOR_OPTIONAL_COLUMNS: &[(&str, &str)] = &[
    ("email", "VARCHAR(255)"),
    ("language", "TEXT"),
    ("location", "TEXT"),
    ("availability", "TEXT"),
    ("experience", "TEXT"),
    ("education", "TEXT"),
    ("certification", "TEXT"),
];

const CLIENT_OPTIONAL_COLUMNS: &[(&str, &str)] = &[
    ("email", "VARCHAR(255)"),
    ("language", "TEXT"),
    ("location", "TEXT"),
    ("availability", "TEXT"),
    ("education", "TEXT"),
];

/// Amount columns older releases declared as fixed-scale DECIMAL: (table, column)
const FLOAT_COLUMNS: &[(&str, &str)] = &[
    ("tutors", "pay"),
    ("tutors", "rating"),
    ("clients", "budget"),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_tutors_created ON tutors(created_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_tutors_email ON tutors(email)",
    "CREATE INDEX IF NOT EXISTS idx_clients_created ON clients(created_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_clients_email ON clients(email)",
];

/// Apply the schema. No-op in sample mode.
pub async fn ensure_schema(storage: &Storage) -> Result<(), SchemaError> {
    let Some(pool) = storage.pool() else {
        tracing::info!("No database configured, skipping schema setup");
        return Ok(());
    };

    tracing::info!("Applying database schema...");

    create_table(pool, "tutors", CREATE_TUTORS).await?;
    add_optional_columns(pool, "tutors", TUTOR_OPTIONAL_COLUMNS).await;

    create_table(pool, "clients", CREATE_CLIENTS).await?;
    add_optional_columns(pool, "clients", CLIENT_OPTIONAL_COLUMNS).await;

    widen_amount_columns(pool).await;
    create_indexes(pool).await;

    tracing::info!("Database schema ready");
    Ok(())
}

async fn create_table(pool: &PgPool, table: &'static str, ddl: &str) -> Result<(), SchemaError> {
    sqlx::query(ddl)
        .execute(pool)
        .await
        .map_err(|source| SchemaError { table, source })?;
    tracing::info!(table, "Table created/verified");
    Ok(())
}

/// Best-effort: failures are logged and skipped.
async fn add_optional_columns(pool: &PgPool, table: &str, columns: &[(&str, &str)]) {
    for (column, ty) in columns {
        let ddl = format!("ALTER TABLE {table} ADD COLUMN IF NOT EXISTS {column} {ty}");
        if let Err(e) = sqlx::query(&ddl).execute(pool).await {
            tracing::warn!(table, column, error = %e, "Could not add optional column");
        }
    }
}

/// Best-effort: DECIMAL(p,s) rounds and overflows, so amounts are stored as float8.
async fn widen_amount_columns(pool: &PgPool) {
    for (table, column) in FLOAT_COLUMNS {
        let ddl = format!("ALTER TABLE {table} ALTER COLUMN {column} TYPE DOUBLE PRECISION");
        if let Err(e) = sqlx::query(&ddl).execute(pool).await {
            tracing::warn!(table, column, error = %e, "Could not widen amount column");
        }
    }
}

async fn create_indexes(pool: &PgPool) {
    for ddl in INDEXES {
        if let Err(e) = sqlx::query(ddl).execute(pool).await {
            tracing::warn!(error = %e, "Could not create index: {}", ddl);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sample_mode_is_noop() {
        ensure_schema(&Storage::sample()).await.unwrap();
    }

    #[test]
    fn optional_columns_exist_in_base_tables() {
        for (column, _) in TUTOR_OPTIONAL_COLUMNS {
            assert!(CREATE_TUTORS.contains(&format!("{column} ")));
        }
        for (column, _) in CLIENT_OPTIONAL_COLUMNS {
            assert!(CREATE_CLIENTS.contains(&format!("{column} ")));
        }
    }

    #[test]
    fn amount_columns_are_unbounded() {
        for ddl in [CREATE_TUTORS, CREATE_CLIENTS] {
            assert!(!ddl.contains("DECIMAL"));
        }
        for (table, column) in FLOAT_COLUMNS {
            let ddl = if *table == "tutors" { CREATE_TUTORS } else { CREATE_CLIENTS };
            assert!(ddl.contains(&format!("{column} DOUBLE PRECISION")));
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn schema_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let storage = Storage::connect(&url).await.expect("connect failed");

        ensure_schema(&storage).await.expect("first run");
        ensure_schema(&storage).await.expect("second run");

        storage.close().await;
    }
}
