//! Placement cell domain model.
//!
//! # Responsibility
//! - Define stored records and their write payloads (drafts).
//! - Keep invariant checks next to the data they protect.
//!
//! # Invariants
//! - Every record is identified by a store-independent UUID.
//! - Drafts are validated before any repository write.

pub mod application;
pub mod company;
pub mod job_profile;
pub mod student;
pub mod training;
pub mod validation;
