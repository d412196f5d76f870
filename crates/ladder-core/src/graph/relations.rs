//! Depth-1 relationship accessors: direct reports and peers.

use anyhow::Context;
use rusqlite::{Connection, params};

use crate::db::store::row_to_collaborator;
use crate::error::LadderError;
use crate::model::Collaborator;

/// Collaborators whose manager is the given collaborator, in insertion
/// order.
///
/// # Errors
///
/// Returns [`LadderError::Db`] for database failures.
pub fn direct_reports(
    conn: &Connection,
    collaborator_id: &str,
) -> Result<Vec<Collaborator>, LadderError> {
    let sql = "SELECT collaborator_id, name, email, manager_id, company_id, \
               created_at_us, updated_at_us \
               FROM collaborators WHERE manager_id = ?1 \
               ORDER BY created_at_us ASC, rowid ASC";

    let mut stmt = conn.prepare(sql).context("prepare direct_reports")?;
    let rows = stmt
        .query_map(params![collaborator_id], row_to_collaborator)
        .context("execute direct_reports")?;

    let mut reports = Vec::new();
    for row in rows {
        reports.push(row.context("read direct report row")?);
    }
    Ok(reports)
}

/// The other direct reports of the collaborator's manager, in insertion
/// order. A collaborator with no manager has no peers.
///
/// # Errors
///
/// Returns [`LadderError::Db`] for database failures.
pub fn peers(
    conn: &Connection,
    collaborator: &Collaborator,
) -> Result<Vec<Collaborator>, LadderError> {
    let Some(manager_id) = collaborator.manager_id.as_deref() else {
        return Ok(Vec::new());
    };

    let reports = direct_reports(conn, manager_id)?;
    Ok(reports
        .into_iter()
        .filter(|peer| peer.collaborator_id != collaborator.collaborator_id)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{migrations, store};
    use crate::model::Company;

    fn test_db() -> Connection {
        let mut conn = Connection::open_in_memory().expect("open in-memory db");
        migrations::migrate(&mut conn).expect("migrate");
        conn
    }

    fn seed(conn: &Connection, company: &Company, name: &str) -> Collaborator {
        let email = format!("{}@initech.example", name.to_ascii_lowercase());
        store::create_collaborator(conn, &company.company_id, name, &email)
            .expect("create collaborator")
    }

    fn manage(conn: &Connection, report: &Collaborator, manager: &Collaborator) {
        store::set_manager(conn, &report.collaborator_id, &manager.collaborator_id)
            .expect("set manager");
    }

    #[test]
    fn direct_reports_in_insertion_order() {
        let conn = test_db();
        let company = store::create_company(&conn, "Initech").unwrap();
        let manager = seed(&conn, &company, "Bill");
        let a = seed(&conn, &company, "Peter");
        let b = seed(&conn, &company, "Samir");
        let c = seed(&conn, &company, "Michael");
        manage(&conn, &a, &manager);
        manage(&conn, &b, &manager);
        manage(&conn, &c, &manager);

        let reports = direct_reports(&conn, &manager.collaborator_id).unwrap();
        let ids: Vec<&str> = reports.iter().map(|r| r.collaborator_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                a.collaborator_id.as_str(),
                b.collaborator_id.as_str(),
                c.collaborator_id.as_str()
            ]
        );
    }

    #[test]
    fn direct_reports_empty_for_leaf() {
        let conn = test_db();
        let company = store::create_company(&conn, "Initech").unwrap();
        let leaf = seed(&conn, &company, "Peter");

        assert!(direct_reports(&conn, &leaf.collaborator_id).unwrap().is_empty());
    }

    #[test]
    fn peers_excludes_the_collaborator_itself() {
        let conn = test_db();
        let company = store::create_company(&conn, "Initech").unwrap();
        let manager = seed(&conn, &company, "Bill");
        let a = seed(&conn, &company, "Peter");
        let b = seed(&conn, &company, "Samir");
        let c = seed(&conn, &company, "Michael");
        manage(&conn, &a, &manager);
        manage(&conn, &b, &manager);
        manage(&conn, &c, &manager);

        let a = store::get_collaborator(&conn, &a.collaborator_id).unwrap();
        let peers_of_a = peers(&conn, &a).unwrap();
        let ids: Vec<&str> = peers_of_a.iter().map(|r| r.collaborator_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![b.collaborator_id.as_str(), c.collaborator_id.as_str()]
        );
    }

    #[test]
    fn peers_empty_without_manager() {
        let conn = test_db();
        let company = store::create_company(&conn, "Initech").unwrap();
        let root = seed(&conn, &company, "Bill");

        assert!(peers(&conn, &root).unwrap().is_empty());
    }

    #[test]
    fn only_child_has_no_peers() {
        let conn = test_db();
        let company = store::create_company(&conn, "Initech").unwrap();
        let manager = seed(&conn, &company, "Bill");
        let only = seed(&conn, &company, "Peter");
        manage(&conn, &only, &manager);

        let only = store::get_collaborator(&conn, &only.collaborator_id).unwrap();
        assert!(peers(&conn, &only).unwrap().is_empty());
    }
}
