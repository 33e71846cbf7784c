//! Route handlers organized by resource

pub mod clients;
pub mod health;
pub mod stats;
pub mod tutors;
