//! Typed error taxonomy for the ladder core.
//!
//! Every failure a caller can act on is a distinct [`LadderError`] variant
//! carrying a stable machine code ([`LadderError::kind`]) and a suggested
//! transport status class ([`LadderError::status`]), so boundary layers can
//! translate errors without inspecting message text.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Transport-agnostic status classification for core errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    /// The referenced record does not exist.
    NotFound,
    /// The request was well-formed but violates a record or hierarchy rule.
    UnprocessableEntity,
    /// The request itself is malformed (e.g. an unknown info type).
    BadRequest,
    /// Storage-layer failure; nothing the client can fix.
    Internal,
}

/// Field → messages map collected during record validation.
///
/// Renders to JSON as `{"email": ["is invalid"], "name": ["can't be blank"]}`,
/// one entry per offending field. All failing fields are reported together
/// rather than first-failure-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for one field, if any.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{field} {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Errors produced by the ladder core.
///
/// Messages on the hierarchy variants are fixed strings; clients match on
/// the variant (or [`LadderError::kind`]), never on the text.
#[derive(Debug, Error)]
pub enum LadderError {
    /// Referenced company or collaborator does not exist.
    #[error("Record not found")]
    NotFound,

    /// Record-level validation failed; see the field → messages map.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// The collaborator already has a manager; re-parenting is never
    /// permitted, even to the same manager.
    #[error("Collaborator already has manager")]
    AlreadyManaged,

    /// The proposed manager belongs to a different company.
    #[error("The manager is not in the same company of the collaborator")]
    CompanyMismatch,

    /// The proposed manager sits below the collaborator in the tree;
    /// committing the edge would create a cycle.
    #[error("The manager is below the collaborator in the hierarchy")]
    HierarchyInversion,

    /// The requested info type is outside the closed set.
    #[error("Information type is not valid")]
    InvalidInfoType,

    /// An underlying database error.
    #[error("database error: {0}")]
    Db(#[from] anyhow::Error),
}

impl LadderError {
    /// Stable machine-readable code for the variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation(_) => "validation",
            Self::AlreadyManaged => "already_managed",
            Self::CompanyMismatch => "company_mismatch",
            Self::HierarchyInversion => "hierarchy_inversion",
            Self::InvalidInfoType => "invalid_info_type",
            Self::Db(_) => "db",
        }
    }

    /// Suggested transport status class.
    #[must_use]
    pub fn status(&self) -> StatusClass {
        match self {
            Self::NotFound => StatusClass::NotFound,
            Self::Validation(_)
            | Self::AlreadyManaged
            | Self::CompanyMismatch
            | Self::HierarchyInversion => StatusClass::UnprocessableEntity,
            Self::InvalidInfoType => StatusClass::BadRequest,
            Self::Db(_) => StatusClass::Internal,
        }
    }
}
