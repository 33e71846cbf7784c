//! Domain models with validation at construction
//!
//! Request payloads are validated before they reach storage.
//! Invalid input returns ValidationError, not panic.

pub mod client;
pub mod tutor;
pub mod validation;

pub use client::{Client, ClientInput};
pub use tutor::{Tutor, TutorInput, DEFAULT_RATING};
pub use validation::ValidationError;
