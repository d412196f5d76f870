use serde::Serialize;

/// A collaborator row: a person belonging to exactly one company, optionally
/// managed by another collaborator in the same company.
///
/// `manager_id` is the adjacency column of the management forest. A row with
/// no manager is a root of its company's tree.
///
/// Outward JSON shape is `{id, name, email, manager_id, company_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collaborator {
    #[serde(rename = "id")]
    pub collaborator_id: String,
    pub name: String,
    pub email: String,
    pub manager_id: Option<String>,
    pub company_id: String,
    #[serde(skip_serializing)]
    pub created_at_us: i64,
    #[serde(skip_serializing)]
    pub updated_at_us: i64,
}

impl Collaborator {
    /// Roots have no manager.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.manager_id.is_none()
    }
}
