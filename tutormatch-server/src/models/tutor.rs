//! Tutor entity and its request payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{optional_email, optional_text, positive_amount, required_name};
use super::ValidationError;

/// Rating assigned when the request omits one.
pub const DEFAULT_RATING: f64 = 5.0;

/// Tutor record as stored in the `tutors` table.
///
/// `id == 0` with `None` timestamps marks a record that was never
/// persisted (sample mode echoes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tutor {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub subjects: Vec<String>,
    /// Hourly rate
    pub pay: f64,
    pub rating: f64,
    pub bio: String,
    pub language: Option<String>,
    pub location: Option<String>,
    pub availability: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub certification: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Tutor {
    /// True once storage has assigned identity and timestamps.
    pub fn is_persisted(&self) -> bool {
        self.id > 0 && self.created_at.is_some()
    }
}

/// Body of `POST /api/tutors` and `PUT /api/admin/tutors/{id}`.
///
/// Identity and timestamps are never taken from the client; unknown
/// fields (such as an echoed `id`) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TutorInput {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    pub pay: f64,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub certification: Option<String>,
}

impl TutorInput {
    /// Validate and normalize the payload.
    ///
    /// # Rules
    /// - `name` trimmed, non-empty, at most 255 characters
    /// - `pay` finite and greater than zero
    /// - `rating` finite, defaults to 5.0
    /// - blank optional strings become `None`
    pub fn validate(self) -> Result<Self, ValidationError> {
        let rating = match self.rating {
            Some(r) if !r.is_finite() => {
                return Err(ValidationError::NotFinite { field: "rating" })
            }
            Some(r) => r,
            None => DEFAULT_RATING,
        };

        Ok(Self {
            name: required_name(self.name)?,
            email: optional_email(self.email)?,
            subjects: self.subjects,
            pay: positive_amount("pay", self.pay)?,
            rating: Some(rating),
            bio: self.bio,
            language: optional_text(self.language),
            location: optional_text(self.location),
            availability: optional_text(self.availability),
            experience: optional_text(self.experience),
            education: optional_text(self.education),
            certification: optional_text(self.certification),
        })
    }

    /// Rating after defaulting.
    pub fn rating(&self) -> f64 {
        self.rating.unwrap_or(DEFAULT_RATING)
    }

    /// Build an unpersisted record carrying the given id.
    pub fn into_tutor(self, id: i32) -> Tutor {
        let rating = self.rating();
        Tutor {
            id,
            name: self.name,
            email: self.email,
            subjects: self.subjects,
            pay: self.pay,
            rating,
            bio: self.bio,
            language: self.language,
            location: self.location,
            availability: self.availability,
            experience: self.experience,
            education: self.education,
            certification: self.certification,
            created_at: None,
            updated_at: None,
        }
    }
}
