//! Canonical SQLite schema for the ladder store.
//!
//! The management forest is stored as an adjacency list: each collaborator
//! row carries a nullable `manager_id` pointing at another row in the same
//! table. Closures are computed on demand (`crate::graph::closure`); nothing
//! tree-shaped is materialized.
//!
//! - `companies` owns collaborators; deleting one cascades
//! - `collaborators.manager_id` uses `ON DELETE SET NULL` so deleting a
//!   manager orphans its reports to roots instead of deleting them
//! - email uniqueness is global and case-insensitive via the `lower(email)`
//!   unique index; the store's procedural check runs first so callers get a
//!   field → message map instead of a constraint error

/// Migration v1: companies, collaborators, and the indexes the read paths use.
pub const MIGRATION_V1_SQL: &str = r"
CREATE TABLE IF NOT EXISTS companies (
    company_id TEXT PRIMARY KEY,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    created_at_us INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS collaborators (
    collaborator_id TEXT PRIMARY KEY,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    email TEXT NOT NULL,
    company_id TEXT NOT NULL REFERENCES companies(company_id) ON DELETE CASCADE,
    manager_id TEXT REFERENCES collaborators(collaborator_id) ON DELETE SET NULL,
    created_at_us INTEGER NOT NULL,
    updated_at_us INTEGER NOT NULL,
    CHECK (manager_id IS NULL OR manager_id <> collaborator_id)
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_collaborators_email_ci
    ON collaborators (lower(email));
CREATE INDEX IF NOT EXISTS idx_collaborators_company
    ON collaborators (company_id);
CREATE INDEX IF NOT EXISTS idx_collaborators_manager
    ON collaborators (manager_id);
";

/// Indexes that must exist after migration (checked by tests).
pub const REQUIRED_INDEXES: &[&str] = &[
    "idx_collaborators_email_ci",
    "idx_collaborators_company",
    "idx_collaborators_manager",
];
