//! Transitive closure over the management tree.
//!
//! The closure is computed as an explicit breadth-first walk seeded by
//! repeated direct-report lookups, accumulating depth and the ancestor path
//! of every row. The path doubles as the cycle guard: a node already on its
//! own ancestor chain is never re-expanded, so the walk terminates even over
//! a corrupted cyclic graph, and each node appears at most once — at the
//! first depth it is reached.
//!
//! Traversal order is breadth-first by depth; within a depth, children are
//! visited parent-by-parent in the store's insertion order, which keeps the
//! output stable and deterministic.

use std::collections::{HashSet, VecDeque};

use rusqlite::Connection;

use crate::db::store;
use crate::error::LadderError;
use crate::graph::relations;
use crate::model::Collaborator;

/// One row of a computed closure: the collaborator, its depth below the
/// queried root (root = 0), and the ancestor ids from the root down to —
/// excluding — the row itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureRow {
    pub collaborator: Collaborator,
    pub depth: u32,
    pub path: Vec<String>,
}

/// The full closure rooted at `root_id`, root included first at depth 0.
///
/// # Errors
///
/// Returns [`LadderError::NotFound`] when the root does not exist, or
/// [`LadderError::Db`] for database failures.
pub fn self_and_descendants(
    conn: &Connection,
    root_id: &str,
) -> Result<Vec<ClosureRow>, LadderError> {
    let root = store::get_collaborator(conn, root_id)?;

    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<ClosureRow> = VecDeque::new();
    let mut result: Vec<ClosureRow> = Vec::new();

    queue.push_back(ClosureRow {
        collaborator: root,
        depth: 0,
        path: Vec::new(),
    });

    while let Some(row) = queue.pop_front() {
        if !visited.insert(row.collaborator.collaborator_id.clone()) {
            continue; // already emitted at a shallower depth
        }

        let mut child_path = row.path.clone();
        child_path.push(row.collaborator.collaborator_id.clone());

        let reports = relations::direct_reports(conn, &row.collaborator.collaborator_id)?;
        for report in reports {
            if child_path.contains(&report.collaborator_id) {
                // Only reachable over corrupted data; the walk must still end.
                tracing::warn!(
                    collaborator_id = %report.collaborator_id,
                    "cycle in manager graph, skipping revisit"
                );
                continue;
            }
            if visited.contains(&report.collaborator_id) {
                continue;
            }
            queue.push_back(ClosureRow {
                collaborator: report,
                depth: row.depth + 1,
                path: child_path.clone(),
            });
        }

        result.push(row);
    }

    Ok(result)
}

/// All nodes reachable below `root_id`, excluding the root itself.
///
/// # Errors
///
/// Returns [`LadderError::NotFound`] when the root does not exist, or
/// [`LadderError::Db`] for database failures.
pub fn descendants(conn: &Connection, root_id: &str) -> Result<Vec<ClosureRow>, LadderError> {
    let mut rows = self_and_descendants(conn, root_id)?;
    rows.remove(0); // root is always first
    Ok(rows)
}

/// Collaborators at exactly `depth` hops below `root_id` (root = 0).
///
/// # Errors
///
/// Returns [`LadderError::NotFound`] when the root does not exist, or
/// [`LadderError::Db`] for database failures.
pub fn descendants_at_depth(
    conn: &Connection,
    root_id: &str,
    depth: u32,
) -> Result<Vec<Collaborator>, LadderError> {
    let rows = self_and_descendants(conn, root_id)?;
    Ok(rows
        .into_iter()
        .filter(|row| row.depth == depth)
        .map(|row| row.collaborator)
        .collect())
}
