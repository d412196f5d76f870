//! Row-level CRUD for companies and collaborators.
//!
//! All functions take a shared `&Connection` reference and return typed
//! structs (never raw rows). Record validation happens here so callers get
//! a field → message map; hierarchy validation does NOT — that belongs to
//! `crate::service::validate_manager`, and [`set_manager`] is deliberately a
//! raw conditional write.
//!
//! Listing order is the store's natural insertion order: `created_at_us`
//! with `rowid` as the tie-break, so rows created in the same microsecond
//! still come back in the order they were inserted.

use anyhow::Context;
use rusqlite::{Connection, params};
use uuid::Uuid;

use crate::error::{LadderError, ValidationErrors};
use crate::model::{Collaborator, Company};

const COLLABORATOR_COLUMNS: &str =
    "collaborator_id, name, email, manager_id, company_id, created_at_us, updated_at_us";

// ---------------------------------------------------------------------------
// Companies
// ---------------------------------------------------------------------------

/// Create a company.
///
/// # Errors
///
/// Returns [`LadderError::Validation`] when the name is blank, or
/// [`LadderError::Db`] for database failures.
pub fn create_company(conn: &Connection, name: &str) -> Result<Company, LadderError> {
    let mut errors = ValidationErrors::new();
    if name.trim().is_empty() {
        errors.add("name", "can't be blank");
    }
    if !errors.is_empty() {
        return Err(LadderError::Validation(errors));
    }

    let company = Company {
        company_id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        created_at_us: now_us(),
    };

    conn.execute(
        "INSERT INTO companies (company_id, name, created_at_us) VALUES (?1, ?2, ?3)",
        params![company.company_id, company.name, company.created_at_us],
    )
    .context("insert company")?;

    tracing::debug!(company_id = %company.company_id, "company created");
    Ok(company)
}

/// Fetch a single company by id.
///
/// # Errors
///
/// Returns [`LadderError::NotFound`] when no row matches, or
/// [`LadderError::Db`] for database failures.
pub fn get_company(conn: &Connection, company_id: &str) -> Result<Company, LadderError> {
    let sql = "SELECT company_id, name, created_at_us FROM companies WHERE company_id = ?1";
    let mut stmt = conn.prepare(sql).context("prepare get_company")?;

    match stmt.query_row(params![company_id], row_to_company) {
        Ok(company) => Ok(company),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(LadderError::NotFound),
        Err(e) => Err(LadderError::Db(
            anyhow::Error::new(e).context(format!("get_company '{company_id}'")),
        )),
    }
}

/// List all companies in insertion order.
///
/// # Errors
///
/// Returns [`LadderError::Db`] for database failures.
pub fn list_companies(conn: &Connection) -> Result<Vec<Company>, LadderError> {
    let sql = "SELECT company_id, name, created_at_us FROM companies \
               ORDER BY created_at_us ASC, rowid ASC";
    let mut stmt = conn.prepare(sql).context("prepare list_companies")?;
    let rows = stmt
        .query_map([], row_to_company)
        .context("execute list_companies")?;

    let mut companies = Vec::new();
    for row in rows {
        companies.push(row.context("read company row")?);
    }
    Ok(companies)
}

/// Delete a company and all of its collaborators.
///
/// # Errors
///
/// Returns [`LadderError::NotFound`] when the company does not exist, or
/// [`LadderError::Db`] for database failures.
pub fn delete_company(conn: &Connection, company_id: &str) -> Result<(), LadderError> {
    get_company(conn, company_id)?;

    in_transaction(conn, || {
        conn.execute(
            "DELETE FROM collaborators WHERE company_id = ?1",
            params![company_id],
        )
        .context("cascade delete collaborators")?;
        conn.execute(
            "DELETE FROM companies WHERE company_id = ?1",
            params![company_id],
        )
        .context("delete company")?;
        Ok(())
    })?;

    tracing::debug!(company_id = %company_id, "company deleted");
    Ok(())
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Create a collaborator scoped to a company; the manager reference starts
/// absent.
///
/// # Errors
///
/// Returns [`LadderError::NotFound`] when the company does not exist,
/// [`LadderError::Validation`] detailing every failed field (blank name,
/// malformed email, duplicate email), or [`LadderError::Db`] for database
/// failures.
pub fn create_collaborator(
    conn: &Connection,
    company_id: &str,
    name: &str,
    email: &str,
) -> Result<Collaborator, LadderError> {
    let company = get_company(conn, company_id)?;

    let mut errors = ValidationErrors::new();
    if name.trim().is_empty() {
        errors.add("name", "can't be blank");
    }
    if !email_is_valid(email) {
        errors.add("email", "is invalid");
    } else if email_taken(conn, email)? {
        errors.add("email", "has already been taken");
    }
    if !errors.is_empty() {
        return Err(LadderError::Validation(errors));
    }

    let now = now_us();
    let collaborator = Collaborator {
        collaborator_id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: email.to_string(),
        manager_id: None,
        company_id: company.company_id,
        created_at_us: now,
        updated_at_us: now,
    };

    let inserted = conn.execute(
        "INSERT INTO collaborators \
         (collaborator_id, name, email, manager_id, company_id, created_at_us, updated_at_us) \
         VALUES (?1, ?2, ?3, NULL, ?4, ?5, ?6)",
        params![
            collaborator.collaborator_id,
            collaborator.name,
            collaborator.email,
            collaborator.company_id,
            collaborator.created_at_us,
            collaborator.updated_at_us,
        ],
    );

    match inserted {
        Ok(_) => {
            tracing::debug!(
                collaborator_id = %collaborator.collaborator_id,
                company_id = %collaborator.company_id,
                "collaborator created"
            );
            Ok(collaborator)
        }
        // A concurrent insert can slip past the procedural check; the
        // lower(email) unique index closes the race.
        Err(e) if is_unique_violation(&e) => {
            let mut errors = ValidationErrors::new();
            errors.add("email", "has already been taken");
            Err(LadderError::Validation(errors))
        }
        Err(e) => Err(LadderError::Db(
            anyhow::Error::new(e).context("insert collaborator"),
        )),
    }
}

/// Fetch a single collaborator by id.
///
/// # Errors
///
/// Returns [`LadderError::NotFound`] when no row matches, or
/// [`LadderError::Db`] for database failures.
pub fn get_collaborator(
    conn: &Connection,
    collaborator_id: &str,
) -> Result<Collaborator, LadderError> {
    let sql = format!(
        "SELECT {COLLABORATOR_COLUMNS} FROM collaborators WHERE collaborator_id = ?1"
    );
    let mut stmt = conn.prepare(&sql).context("prepare get_collaborator")?;

    match stmt.query_row(params![collaborator_id], row_to_collaborator) {
        Ok(collaborator) => Ok(collaborator),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(LadderError::NotFound),
        Err(e) => Err(LadderError::Db(
            anyhow::Error::new(e).context(format!("get_collaborator '{collaborator_id}'")),
        )),
    }
}

/// List a company's collaborators in insertion order.
///
/// # Errors
///
/// Returns [`LadderError::NotFound`] when the company does not exist, or
/// [`LadderError::Db`] for database failures.
pub fn list_collaborators(
    conn: &Connection,
    company_id: &str,
) -> Result<Vec<Collaborator>, LadderError> {
    get_company(conn, company_id)?;

    let sql = format!(
        "SELECT {COLLABORATOR_COLUMNS} FROM collaborators WHERE company_id = ?1 \
         ORDER BY created_at_us ASC, rowid ASC"
    );
    let mut stmt = conn.prepare(&sql).context("prepare list_collaborators")?;
    let rows = stmt
        .query_map(params![company_id], row_to_collaborator)
        .context("execute list_collaborators")?;

    let mut collaborators = Vec::new();
    for row in rows {
        collaborators.push(row.context("read collaborator row")?);
    }
    Ok(collaborators)
}

/// Write the manager edge, conditionally: the update only matches while the
/// row is still unmanaged, which makes the already-managed check and the
/// write atomic per collaborator. Of two racing assignments, exactly one
/// matches; the loser re-reads and observes [`LadderError::AlreadyManaged`].
///
/// This is a raw write — no hierarchy validation. Callers go through
/// `crate::service::validate_manager` first.
///
/// # Errors
///
/// Returns [`LadderError::NotFound`] when the collaborator does not exist,
/// [`LadderError::AlreadyManaged`] when a manager reference is already set,
/// or [`LadderError::Db`] for database failures.
pub fn set_manager(
    conn: &Connection,
    collaborator_id: &str,
    manager_id: &str,
) -> Result<(), LadderError> {
    let affected = conn
        .execute(
            "UPDATE collaborators SET manager_id = ?2, updated_at_us = ?3 \
             WHERE collaborator_id = ?1 AND manager_id IS NULL",
            params![collaborator_id, manager_id, now_us()],
        )
        .context("set manager reference")?;

    if affected == 0 {
        // Zero rows matched: the row is missing, or a manager won the race.
        let current = get_collaborator(conn, collaborator_id)?;
        if current.manager_id.is_some() {
            return Err(LadderError::AlreadyManaged);
        }
        return Err(LadderError::Db(anyhow::anyhow!(
            "set_manager matched no rows for unmanaged collaborator '{collaborator_id}'"
        )));
    }

    tracing::debug!(
        collaborator_id = %collaborator_id,
        manager_id = %manager_id,
        "manager reference written"
    );
    Ok(())
}

/// Delete a collaborator. Everyone it managed is orphaned to a root: their
/// `manager_id` is cleared, not cascaded to delete.
///
/// # Errors
///
/// Returns [`LadderError::NotFound`] when the collaborator does not exist,
/// or [`LadderError::Db`] for database failures.
pub fn delete_collaborator(
    conn: &Connection,
    collaborator_id: &str,
) -> Result<(), LadderError> {
    get_collaborator(conn, collaborator_id)?;

    in_transaction(conn, || {
        conn.execute(
            "UPDATE collaborators SET manager_id = NULL WHERE manager_id = ?1",
            params![collaborator_id],
        )
        .context("clear manager references")?;
        conn.execute(
            "DELETE FROM collaborators WHERE collaborator_id = ?1",
            params![collaborator_id],
        )
        .context("delete collaborator")?;
        Ok(())
    })?;

    tracing::debug!(collaborator_id = %collaborator_id, "collaborator deleted");
    Ok(())
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn now_us() -> i64 {
    chrono::Utc::now().timestamp_micros()
}

/// Minimal email shape: an `@` with a non-whitespace character on each side.
fn email_is_valid(email: &str) -> bool {
    let chars: Vec<char> = email.chars().collect();
    chars
        .windows(3)
        .any(|w| w[1] == '@' && !w[0].is_whitespace() && !w[2].is_whitespace())
}

/// Case-insensitive global uniqueness check.
fn email_taken(conn: &Connection, email: &str) -> Result<bool, LadderError> {
    let taken: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM collaborators WHERE lower(email) = lower(?1))",
            params![email],
            |row| row.get(0),
        )
        .context("check email uniqueness")?;
    Ok(taken)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Run `body` inside an IMMEDIATE transaction on a shared connection,
/// rolling back if it fails.
fn in_transaction(
    conn: &Connection,
    body: impl FnOnce() -> Result<(), LadderError>,
) -> Result<(), LadderError> {
    conn.execute_batch("BEGIN IMMEDIATE")
        .context("begin transaction")?;

    match body() {
        Ok(()) => {
            conn.execute_batch("COMMIT").context("commit transaction")?;
            Ok(())
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}

fn row_to_company(row: &rusqlite::Row<'_>) -> rusqlite::Result<Company> {
    Ok(Company {
        company_id: row.get(0)?,
        name: row.get(1)?,
        created_at_us: row.get(2)?,
    })
}

pub(crate) fn row_to_collaborator(row: &rusqlite::Row<'_>) -> rusqlite::Result<Collaborator> {
    Ok(Collaborator {
        collaborator_id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        manager_id: row.get(3)?,
        company_id: row.get(4)?,
        created_at_us: row.get(5)?,
        updated_at_us: row.get(6)?,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
