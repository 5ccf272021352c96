//! Screen view-models.
//!
//! # Responsibility
//! - Hold per-screen state (rows, open form, pending alert) with explicit
//!   `reload` and mutation commands.
//! - Translate repository failures into operator-facing alerts and logs.
//!
//! # Invariants
//! - Fetch failures keep the previous rows and are logged, never alerted.
//! - Write failures raise a blocking error alert naming the action.
//! - Every submit resets the form and refetches, successful or not.
//! - Deletes refetch only on success.

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod applications;
pub mod companies;
pub mod crud;
pub mod dashboard;
pub mod job_profiles;
pub mod students;
pub mod training;

pub use crud::{CrudScreen, CrudStore, FormMode, FormState};

/// Severity of a blocking alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// Blocking message the UI must show and dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == AlertKind::Error
    }
}

/// Mutating action attempted from a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Create,
    Update,
    Delete,
    Enroll,
}

impl WriteAction {
    /// Progressive verb used in failure alerts ("Error creating ...").
    pub fn progressive(self) -> &'static str {
        match self {
            Self::Create => "creating",
            Self::Update => "updating",
            Self::Delete => "deleting",
            Self::Enroll => "enrolling",
        }
    }

    /// Past participle used in success alerts ("... created successfully!").
    pub fn past(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
            Self::Enroll => "enrolled",
        }
    }
}

/// Failure of a screen command.
#[derive(Debug)]
pub enum ScreenError {
    /// A read failed; the affected rows stay as they were.
    Fetch {
        subject: &'static str,
        source: RepoError,
    },
    /// An insert, update or delete failed.
    Write {
        action: WriteAction,
        entity: &'static str,
        source: RepoError,
    },
    /// Submit was called with no open form.
    NoOpenForm,
    /// The referenced row is not part of the current listing.
    UnknownRow(String),
}

impl Display for ScreenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch { subject, source } => write!(f, "Error fetching {subject}: {source}"),
            Self::Write {
                action,
                entity,
                source,
            } => write!(f, "Error {} {entity}: {source}", action.progressive()),
            Self::NoOpenForm => write!(f, "no form is open"),
            Self::UnknownRow(id) => write!(f, "row {id} is not in the current listing"),
        }
    }
}

impl Error for ScreenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fetch { source, .. } | Self::Write { source, .. } => Some(source),
            Self::NoOpenForm | Self::UnknownRow(_) => None,
        }
    }
}

pub(crate) fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{capitalize, ScreenError, WriteAction};
    use crate::repo::RepoError;

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("job profile"), "Job profile");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn write_error_names_the_action() {
        let error = ScreenError::Write {
            action: WriteAction::Update,
            entity: "company",
            source: RepoError::Constraint("UNIQUE constraint failed".to_string()),
        };
        assert!(error.to_string().starts_with("Error updating company"));
    }
}
