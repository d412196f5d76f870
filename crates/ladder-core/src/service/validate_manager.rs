//! Manager-assignment validation.
//!
//! Three sequential checks guard the manager edge; the first failure wins
//! and nothing is written:
//!
//! 1. the collaborator must not already have a manager — re-parenting is
//!    never permitted, even to the same manager
//! 2. both rows must belong to the same company
//! 3. the proposed manager must not sit below the collaborator in the tree
//!    (that edge would close a cycle)
//!
//! Check 3 walks the collaborator's descendant closure, so it is skipped
//! when the collaborator has no direct reports — an empty subtree cannot
//! contain the candidate.

use rusqlite::Connection;

use crate::db::store;
use crate::error::LadderError;
use crate::graph::{closure, relations};
use crate::model::Collaborator;

/// Check whether `manager` may become `collaborator`'s manager.
///
/// Read-only; on success the caller may commit the edge via
/// [`store::set_manager`].
///
/// # Errors
///
/// Returns [`LadderError::AlreadyManaged`], [`LadderError::CompanyMismatch`],
/// or [`LadderError::HierarchyInversion`] when the corresponding check
/// fails, and [`LadderError::Db`] for database failures.
pub fn validate_manager(
    conn: &Connection,
    collaborator: &Collaborator,
    manager: &Collaborator,
) -> Result<(), LadderError> {
    if collaborator.manager_id.is_some() {
        return Err(LadderError::AlreadyManaged);
    }

    if collaborator.company_id != manager.company_id {
        return Err(LadderError::CompanyMismatch);
    }

    // Self-management is a trivial inversion; catch it before the walk so
    // the zero-reports skip below cannot mask it.
    if collaborator.collaborator_id == manager.collaborator_id {
        return Err(LadderError::HierarchyInversion);
    }

    let reports = relations::direct_reports(conn, &collaborator.collaborator_id)?;
    if reports.is_empty() {
        return Ok(());
    }

    let inverted = closure::descendants(conn, &collaborator.collaborator_id)?
        .into_iter()
        .any(|row| row.collaborator.collaborator_id == manager.collaborator_id);
    if inverted {
        return Err(LadderError::HierarchyInversion);
    }

    Ok(())
}

/// Resolve both rows, validate, then commit the edge and return the updated
/// collaborator.
///
/// The commit is the store's conditional update, so two racing assignments
/// cannot both succeed: the loser surfaces [`LadderError::AlreadyManaged`].
///
/// # Errors
///
/// Returns [`LadderError::NotFound`] when either row is missing, any
/// validator error, or [`LadderError::Db`] for database failures.
pub fn assign_manager(
    conn: &Connection,
    collaborator_id: &str,
    manager_id: &str,
) -> Result<Collaborator, LadderError> {
    let collaborator = store::get_collaborator(conn, collaborator_id)?;
    let manager = store::get_collaborator(conn, manager_id)?;

    validate_manager(conn, &collaborator, &manager)?;
    store::set_manager(conn, collaborator_id, manager_id)?;

    tracing::info!(
        collaborator_id = %collaborator_id,
        manager_id = %manager_id,
        "manager assigned"
    );
    store::get_collaborator(conn, collaborator_id)
}
