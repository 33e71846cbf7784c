//! Client repository
//!
//! Same contract as the tutor repository, over the `clients` table.

use sqlx::PgPool;

use super::DbError;
use crate::db::pool::Storage;
use crate::db::sample::sample_clients;
use crate::models::{Client, ClientInput};

const RESOURCE: &str = "client";

const CLIENT_COLUMNS: &str = r#"
    id, name, email,
    COALESCE(subjects, '{}') AS subjects,
    budget::float8 AS budget,
    COALESCE(description, '') AS description,
    language, location, availability, education,
    created_at, updated_at
"#;

/// Client repository
pub struct ClientRepo<'a> {
    storage: &'a Storage,
}

impl<'a> ClientRepo<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub async fn list(&self) -> Result<Vec<Client>, DbError> {
        let Some(pool) = self.storage.pool() else {
            return Ok(sample_clients());
        };

        let sql = format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY created_at DESC NULLS LAST, id DESC"
        );
        let clients = sqlx::query_as::<_, Client>(&sql).fetch_all(pool).await?;
        Ok(clients)
    }

    pub async fn create(&self, input: ClientInput) -> Result<Client, DbError> {
        let Some(pool) = self.storage.pool() else {
            tracing::debug!("Sample mode: client not persisted");
            return Ok(input.into_client(0));
        };

        let client = insert(pool, &input).await?;
        tracing::info!(id = client.id, "Client created");
        Ok(client)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Client, DbError> {
        let Some(pool) = self.storage.pool() else {
            return sample_clients()
                .into_iter()
                .find(|c| c.id == id)
                .ok_or_else(|| DbError::not_found(RESOURCE, id));
        };

        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Most recently created exact match, if any.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Client>, DbError> {
        let Some(pool) = self.storage.pool() else {
            return Ok(sample_clients()
                .into_iter()
                .find(|c| c.email.as_deref() == Some(email)));
        };

        let sql = format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE email = $1 \
             ORDER BY created_at DESC NULLS LAST, id DESC LIMIT 1"
        );
        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(client)
    }

    pub async fn update(&self, id: i32, input: ClientInput) -> Result<Client, DbError> {
        let Some(pool) = self.storage.pool() else {
            tracing::debug!(id, "Sample mode: client update discarded");
            return Ok(input.into_client(id));
        };

        let client = replace(pool, id, &input)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))?;
        tracing::info!(id, "Client updated");
        Ok(client)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let Some(pool) = self.storage.pool() else {
            tracing::debug!(id, "Sample mode: client delete discarded");
            return Ok(());
        };

        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(RESOURCE, id));
        }

        tracing::info!(id, "Client deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let Some(pool) = self.storage.pool() else {
            return Ok(sample_clients().len() as i64);
        };

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clients")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}

async fn insert(pool: &PgPool, input: &ClientInput) -> Result<Client, sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO clients (
            name, email, subjects, budget, description,
            language, location, availability, education
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {CLIENT_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Client>(&sql)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.subjects)
        .bind(input.budget)
        .bind(&input.description)
        .bind(&input.language)
        .bind(&input.location)
        .bind(&input.availability)
        .bind(&input.education)
        .fetch_one(pool)
        .await
}

async fn replace(
    pool: &PgPool,
    id: i32,
    input: &ClientInput,
) -> Result<Option<Client>, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE clients SET
            name = $2,
            email = $3,
            subjects = $4,
            budget = $5,
            description = $6,
            language = $7,
            location = $8,
            availability = $9,
            education = $10,
            updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond')
        WHERE id = $1
        RETURNING {CLIENT_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Client>(&sql)
        .bind(id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.subjects)
        .bind(input.budget)
        .bind(&input.description)
        .bind(&input.language)
        .bind(&input.location)
        .bind(&input.availability)
        .bind(&input.education)
        .fetch_optional(pool)
        .await
}
