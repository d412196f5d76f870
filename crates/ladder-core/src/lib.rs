//! ladder-core: the hierarchy engine behind `lad`.
//!
//! Companies own collaborators; collaborators form a management forest via a
//! nullable `manager_id` adjacency column. This crate provides:
//!
//! - [`db`] — the SQLite store: schema, migrations, and row-level CRUD
//! - [`graph`] — derived views over the tree: transitive closures with
//!   depth/path metadata, peers, direct reports
//! - [`service`] — the manager-assignment validator and the info-type
//!   dispatch facade
//! - [`error`] — the typed error taxonomy every public function returns
//!
//! # Conventions
//!
//! - **Errors**: public operations return [`error::LadderError`]; database
//!   plumbing inside them uses `anyhow` context chains and surfaces as the
//!   `Db` variant.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`). Nothing in
//!   this crate is fatal to the process; every failure is scoped to the one
//!   requested operation.

pub mod db;
pub mod error;
pub mod graph;
pub mod model;
pub mod service;

pub use error::{LadderError, StatusClass, ValidationErrors};
pub use model::{Collaborator, Company};
