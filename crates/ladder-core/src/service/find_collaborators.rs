//! Info-type dispatch: the closed set of relationship views a collaborator
//! can be asked for.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::LadderError;
use crate::graph::{closure, relations};
use crate::model::Collaborator;

/// Depth of the "second level" view: direct reports of direct reports.
pub const SECOND_LEVEL_DEPTH: u32 = 2;

/// The closed set of relationship views.
///
/// Modeled as a tagged enum rather than a free string so dispatch is
/// exhaustive; anything outside the set fails at parse time with
/// [`LadderError::InvalidInfoType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfoType {
    /// The other direct reports of the collaborator's manager.
    Peers,
    /// The collaborator's direct reports.
    Managed,
    /// Reports of the collaborator's reports (depth 2 from the queried node).
    SecondLevelManaged,
}

impl InfoType {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Peers => "peers",
            Self::Managed => "managed",
            Self::SecondLevelManaged => "second_level_managed",
        }
    }
}

impl fmt::Display for InfoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InfoType {
    type Err = LadderError;

    fn from_str(s: &str) -> Result<Self, LadderError> {
        match s.trim() {
            "peers" => Ok(Self::Peers),
            "managed" => Ok(Self::Managed),
            "second_level_managed" => Ok(Self::SecondLevelManaged),
            _ => Err(LadderError::InvalidInfoType),
        }
    }
}

/// Resolve the requested view for a collaborator.
///
/// # Errors
///
/// Returns [`LadderError::Db`] for database failures. (An unknown info type
/// never reaches this function; it fails at [`InfoType::from_str`].)
pub fn find_collaborators(
    conn: &Connection,
    collaborator: &Collaborator,
    info_type: InfoType,
) -> Result<Vec<Collaborator>, LadderError> {
    match info_type {
        InfoType::Peers => relations::peers(conn, collaborator),
        InfoType::Managed => relations::direct_reports(conn, &collaborator.collaborator_id),
        InfoType::SecondLevelManaged => closure::descendants_at_depth(
            conn,
            &collaborator.collaborator_id,
            SECOND_LEVEL_DEPTH,
        ),
    }
}
