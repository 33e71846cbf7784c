//! Runtime configuration shared by the server and the CLI
//!
//! Values arrive from flags/environment in the CLI; this module only
//! holds the parsed forms and their defaults.

use std::fmt;

use serde::Serialize;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Used when no admin emails are configured
pub const DEFAULT_ADMIN_EMAILS: &[&str] = &["admin@example.com"];

/// Configuration errors, fatal at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("database URL is not set (use DATABASE_URL, or --sample-data to run without storage)")]
    MissingDatabaseUrl,

    #[error("invalid database URL: {0}")]
    InvalidUrl(#[source] sqlx::Error),

    #[error("database unreachable: {0}")]
    Unreachable(#[source] sqlx::Error),
}

/// How the process stores data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Backed by Postgres
    Postgres,
    /// No storage: fixed sample data for reads, writes are discarded
    Sample,
}

impl StorageMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sample => "sample",
        }
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static set of emails allowed to call admin routes.
///
/// Comparison is ASCII case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAllowlist {
    emails: Vec<String>,
}

impl AdminAllowlist {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emails: Vec<String> = emails
            .into_iter()
            .map(|e| e.as_ref().trim().to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        if emails.is_empty() {
            tracing::warn!("No admin emails configured, using built-in default");
            return Self::default();
        }

        Self { emails }
    }

    /// Parse a comma-separated list (the `ADMIN_EMAILS` format).
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn contains(&self, email: &str) -> bool {
        let email = email.trim();
        self.emails.iter().any(|e| e.eq_ignore_ascii_case(email))
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

impl Default for AdminAllowlist {
    fn default() -> Self {
        Self {
            emails: DEFAULT_ADMIN_EMAILS.iter().map(|e| (*e).to_owned()).collect(),
        }
    }
}
