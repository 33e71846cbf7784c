//! Client entity and its request payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{optional_email, optional_text, positive_amount, required_name};
use super::ValidationError;

/// Client record as stored in the `clients` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub subjects: Vec<String>,
    pub budget: f64,
    pub description: String,
    pub language: Option<String>,
    pub location: Option<String>,
    pub availability: Option<String>,
    pub education: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Client {
    pub fn is_persisted(&self) -> bool {
        self.id > 0 && self.created_at.is_some()
    }
}

/// Body of `POST /api/clients` and `PUT /api/admin/clients/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientInput {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    pub budget: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
}

impl ClientInput {
    /// Same rules as tutors, with `budget` in place of `pay`.
    pub fn validate(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_name(self.name)?,
            email: optional_email(self.email)?,
            subjects: self.subjects,
            budget: positive_amount("budget", self.budget)?,
            description: self.description,
            language: optional_text(self.language),
            location: optional_text(self.location),
            availability: optional_text(self.availability),
            education: optional_text(self.education),
        })
    }

    pub fn into_client(self, id: i32) -> Client {
        Client {
            id,
            name: self.name,
            email: self.email,
            subjects: self.subjects,
            budget: self.budget,
            description: self.description,
            language: self.language,
            location: self.location,
            availability: self.availability,
            education: self.education,
            created_at: None,
            updated_at: None,
        }
    }
}
