//! Tutor repository
//!
//! Maps `Tutor` to rows of the `tutors` table:
//! - list: newest first
//! - create/update: single statement with RETURNING
//! - get_by_email: most recently created match wins

use sqlx::PgPool;

use super::DbError;
use crate::db::pool::Storage;
use crate::db::sample::sample_tutors;
use crate::models::{Tutor, TutorInput};

const RESOURCE: &str = "tutor";

/// Column list shared by SELECT and RETURNING.
///
/// Amounts are cast to float8 for tables not yet widened; COALESCE covers
/// rows written before those columns were NOT NULL.
const TUTOR_COLUMNS: &str = r#"
    id, name, email,
    COALESCE(subjects, '{}') AS subjects,
    pay::float8 AS pay,
    COALESCE(rating, 5.0)::float8 AS rating,
    COALESCE(bio, '') AS bio,
    language, location, availability, experience, education, certification,
    created_at, updated_at
"#;

/// Tutor repository
pub struct TutorRepo<'a> {
    storage: &'a Storage,
}

impl<'a> TutorRepo<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All tutors, most recently created first.
    ///
    /// Sample mode returns the fixed sample list.
    pub async fn list(&self) -> Result<Vec<Tutor>, DbError> {
        let Some(pool) = self.storage.pool() else {
            return Ok(sample_tutors());
        };

        let sql = format!(
            "SELECT {TUTOR_COLUMNS} FROM tutors ORDER BY created_at DESC NULLS LAST, id DESC"
        );
        let tutors = sqlx::query_as::<_, Tutor>(&sql).fetch_all(pool).await?;
        Ok(tutors)
    }

    /// Insert a tutor; storage assigns id and timestamps.
    ///
    /// Sample mode echoes the input with `id = 0` and no timestamps.
    pub async fn create(&self, input: TutorInput) -> Result<Tutor, DbError> {
        let Some(pool) = self.storage.pool() else {
            tracing::debug!("Sample mode: tutor not persisted");
            return Ok(input.into_tutor(0));
        };

        let tutor = insert(pool, &input).await?;
        tracing::info!(id = tutor.id, "Tutor created");
        Ok(tutor)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Tutor, DbError> {
        let Some(pool) = self.storage.pool() else {
            return sample_tutors()
                .into_iter()
                .find(|t| t.id == id)
                .ok_or_else(|| DbError::not_found(RESOURCE, id));
        };

        let sql = format!("SELECT {TUTOR_COLUMNS} FROM tutors WHERE id = $1");
        sqlx::query_as::<_, Tutor>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Exact, case-sensitive email match. `None` when nothing matches.
    ///
    /// Email is not unique in storage; the most recently created row wins.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Tutor>, DbError> {
        let Some(pool) = self.storage.pool() else {
            return Ok(sample_tutors()
                .into_iter()
                .find(|t| t.email.as_deref() == Some(email)));
        };

        let sql = format!(
            "SELECT {TUTOR_COLUMNS} FROM tutors WHERE email = $1 \
             ORDER BY created_at DESC NULLS LAST, id DESC LIMIT 1"
        );
        let tutor = sqlx::query_as::<_, Tutor>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(tutor)
    }

    /// Replace every mutable field of tutor `id` and advance `updated_at`.
    ///
    /// Sample mode echoes the input under the given id.
    pub async fn update(&self, id: i32, input: TutorInput) -> Result<Tutor, DbError> {
        let Some(pool) = self.storage.pool() else {
            tracing::debug!(id, "Sample mode: tutor update discarded");
            return Ok(input.into_tutor(id));
        };

        let tutor = replace(pool, id, &input)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))?;
        tracing::info!(id, "Tutor updated");
        Ok(tutor)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let Some(pool) = self.storage.pool() else {
            tracing::debug!(id, "Sample mode: tutor delete discarded");
            return Ok(());
        };

        let result = sqlx::query("DELETE FROM tutors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(RESOURCE, id));
        }

        tracing::info!(id, "Tutor deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let Some(pool) = self.storage.pool() else {
            return Ok(sample_tutors().len() as i64);
        };

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tutors")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}

async fn insert(pool: &PgPool, input: &TutorInput) -> Result<Tutor, sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO tutors (
            name, email, subjects, pay, rating, bio,
            language, location, availability, experience, education, certification
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {TUTOR_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Tutor>(&sql)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.subjects)
        .bind(input.pay)
        .bind(input.rating())
        .bind(&input.bio)
        .bind(&input.language)
        .bind(&input.location)
        .bind(&input.availability)
        .bind(&input.experience)
        .bind(&input.education)
        .bind(&input.certification)
        .fetch_one(pool)
        .await
}

/// `updated_at` strictly advances even when the clock hasn't ticked.
async fn replace(pool: &PgPool, id: i32, input: &TutorInput) -> Result<Option<Tutor>, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE tutors SET
            name = $2,
            email = $3,
            subjects = $4,
            pay = $5,
            rating = $6,
            bio = $7,
            language = $8,
            location = $9,
            availability = $10,
            experience = $11,
            education = $12,
            certification = $13,
            updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond')
        WHERE id = $1
        RETURNING {TUTOR_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Tutor>(&sql)
        .bind(id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.subjects)
        .bind(input.pay)
        .bind(input.rating())
        .bind(&input.bio)
        .bind(&input.language)
        .bind(&input.location)
        .bind(&input.availability)
        .bind(&input.experience)
        .bind(&input.education)
        .bind(&input.certification)
        .fetch_optional(pool)
        .await
}
