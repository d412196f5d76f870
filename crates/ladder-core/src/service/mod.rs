//! Operation-level services composed from the store and graph layers.
//!
//! [`validate_manager`] guards the one mutation that can bend the tree;
//! [`find_collaborators`] dispatches the closed set of relationship views.

pub mod find_collaborators;
pub mod validate_manager;

pub use find_collaborators::{InfoType, find_collaborators};
pub use validate_manager::{assign_manager, validate_manager};
