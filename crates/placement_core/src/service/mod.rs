//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository reads into use-case level results.
//! - Keep screens decoupled from storage details.

pub mod dashboard_service;
