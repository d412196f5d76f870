//! End-to-end organization scenarios against an on-disk store.

use ladder_core::db::{open_store, store};
use ladder_core::graph::{closure, relations};
use ladder_core::service::{InfoType, assign_manager, find_collaborators};
use ladder_core::{Collaborator, Company, LadderError};
use rusqlite::Connection;
use tempfile::TempDir;

fn open_test_store() -> (TempDir, Connection) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let conn = open_store(&dir.path().join("ladder.sqlite3")).expect("open store");
    (dir, conn)
}

fn hire(conn: &Connection, company: &Company, name: &str, email: &str) -> Collaborator {
    store::create_collaborator(conn, &company.company_id, name, email)
        .expect("create collaborator")
}

fn ids(rows: &[Collaborator]) -> Vec<&str> {
    rows.iter().map(|c| c.collaborator_id.as_str()).collect()
}

#[test]
fn peer_and_depth_scenario() {
    // Company K; M is a root; A, B, C report to M; D, E report to A.
    let (_dir, conn) = open_test_store();
    let k = store::create_company(&conn, "K").expect("create company");

    let m = hire(&conn, &k, "M", "m@k.example");
    let a = hire(&conn, &k, "A", "a@k.example");
    let b = hire(&conn, &k, "B", "b@k.example");
    let c = hire(&conn, &k, "C", "c@k.example");
    for report in [&a, &b, &c] {
        assign_manager(&conn, &report.collaborator_id, &m.collaborator_id).expect("assign");
    }

    let a = store::get_collaborator(&conn, &a.collaborator_id).expect("reload A");
    let peers_of_a = relations::peers(&conn, &a).expect("peers");
    assert_eq!(
        ids(&peers_of_a),
        vec![b.collaborator_id.as_str(), c.collaborator_id.as_str()]
    );

    let managed = relations::direct_reports(&conn, &m.collaborator_id).expect("reports");
    assert_eq!(
        ids(&managed),
        vec![
            a.collaborator_id.as_str(),
            b.collaborator_id.as_str(),
            c.collaborator_id.as_str()
        ]
    );

    let d = hire(&conn, &k, "D", "d@k.example");
    let e = hire(&conn, &k, "E", "e@k.example");
    assign_manager(&conn, &d.collaborator_id, &a.collaborator_id).expect("assign D");
    assign_manager(&conn, &e.collaborator_id, &a.collaborator_id).expect("assign E");

    let second_level =
        closure::descendants_at_depth(&conn, &m.collaborator_id, 2).expect("depth 2");
    assert_eq!(
        ids(&second_level),
        vec![d.collaborator_id.as_str(), e.collaborator_id.as_str()]
    );

    // The facade resolves the same sequences.
    let m = store::get_collaborator(&conn, &m.collaborator_id).expect("reload M");
    let via_facade =
        find_collaborators(&conn, &m, InfoType::SecondLevelManaged).expect("facade depth 2");
    assert_eq!(ids(&via_facade), ids(&second_level));
}

#[test]
fn manager_assignment_is_permanent() {
    // A has manager M; pointing A at N must fail and leave M in place.
    let (_dir, conn) = open_test_store();
    let k = store::create_company(&conn, "K").expect("create company");

    let m = hire(&conn, &k, "M", "m@k.example");
    let n = hire(&conn, &k, "N", "n@k.example");
    let a = hire(&conn, &k, "A", "a@k.example");
    assign_manager(&conn, &a.collaborator_id, &m.collaborator_id).expect("assign M");

    let err = assign_manager(&conn, &a.collaborator_id, &n.collaborator_id).unwrap_err();
    assert!(matches!(err, LadderError::AlreadyManaged));
    assert_eq!(err.to_string(), "Collaborator already has manager");

    let a = store::get_collaborator(&conn, &a.collaborator_id).expect("reload A");
    assert_eq!(a.manager_id.as_deref(), Some(m.collaborator_id.as_str()));
}

#[test]
fn inversion_scenario() {
    // M manages A; A manages B; B can never become M's manager.
    let (_dir, conn) = open_test_store();
    let k = store::create_company(&conn, "K").expect("create company");

    let m = hire(&conn, &k, "M", "m@k.example");
    let a = hire(&conn, &k, "A", "a@k.example");
    let b = hire(&conn, &k, "B", "b@k.example");
    assign_manager(&conn, &a.collaborator_id, &m.collaborator_id).expect("assign A");
    assign_manager(&conn, &b.collaborator_id, &a.collaborator_id).expect("assign B");

    let err = assign_manager(&conn, &m.collaborator_id, &b.collaborator_id).unwrap_err();
    assert!(matches!(err, LadderError::HierarchyInversion));
    assert_eq!(
        err.to_string(),
        "The manager is below the collaborator in the hierarchy"
    );
}

#[test]
fn cross_company_scenario() {
    let (_dir, conn) = open_test_store();
    let k = store::create_company(&conn, "K").expect("create company");
    let z = store::create_company(&conn, "Z").expect("create company");

    let a = hire(&conn, &k, "A", "a@k.example");
    let outsider = hire(&conn, &z, "O", "o@z.example");

    let err = assign_manager(&conn, &a.collaborator_id, &outsider.collaborator_id).unwrap_err();
    assert!(matches!(err, LadderError::CompanyMismatch));
}

#[test]
fn deleting_a_manager_orphans_reports() {
    let (_dir, conn) = open_test_store();
    let k = store::create_company(&conn, "K").expect("create company");

    let m = hire(&conn, &k, "M", "m@k.example");
    let a = hire(&conn, &k, "A", "a@k.example");
    let b = hire(&conn, &k, "B", "b@k.example");
    assign_manager(&conn, &a.collaborator_id, &m.collaborator_id).expect("assign A");
    assign_manager(&conn, &b.collaborator_id, &m.collaborator_id).expect("assign B");

    store::delete_collaborator(&conn, &m.collaborator_id).expect("delete M");

    for id in [&a.collaborator_id, &b.collaborator_id] {
        let survivor = store::get_collaborator(&conn, id).expect("report survives");
        assert!(survivor.is_root());
    }

    // Orphans may be re-assigned: the old edge is gone, not remembered.
    let c = hire(&conn, &k, "C", "c@k.example");
    assign_manager(&conn, &a.collaborator_id, &c.collaborator_id).expect("re-assign A");
}

#[test]
fn email_uniqueness_is_case_insensitive_across_companies() {
    let (_dir, conn) = open_test_store();
    let k = store::create_company(&conn, "K").expect("create company");
    let z = store::create_company(&conn, "Z").expect("create company");

    hire(&conn, &k, "A", "x@y.com");

    let err = store::create_collaborator(&conn, &z.company_id, "B", "X@Y.com").unwrap_err();
    match err {
        LadderError::Validation(errors) => {
            assert_eq!(
                errors.field("email"),
                Some(&["has already been taken".to_string()][..])
            );
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn closure_properties_hold_on_a_wide_tree() {
    let (_dir, conn) = open_test_store();
    let k = store::create_company(&conn, "K").expect("create company");

    let root = hire(&conn, &k, "Root", "root@k.example");
    let mut leaves = Vec::new();
    for i in 0..4 {
        let mid = hire(&conn, &k, &format!("Mid{i}"), &format!("mid{i}@k.example"));
        assign_manager(&conn, &mid.collaborator_id, &root.collaborator_id).expect("assign mid");
        for j in 0..2 {
            let leaf = hire(
                &conn,
                &k,
                &format!("Leaf{i}{j}"),
                &format!("leaf{i}{j}@k.example"),
            );
            assign_manager(&conn, &leaf.collaborator_id, &mid.collaborator_id)
                .expect("assign leaf");
            leaves.push(leaf.collaborator_id);
        }
    }

    let below = closure::descendants(&conn, &root.collaborator_id).expect("descendants");
    assert_eq!(below.len(), 12);
    assert!(
        below
            .iter()
            .all(|row| row.collaborator.collaborator_id != root.collaborator_id)
    );

    let with_root =
        closure::self_and_descendants(&conn, &root.collaborator_id).expect("closure");
    assert_eq!(with_root.len(), 13);
    assert_eq!(with_root[0].collaborator.collaborator_id, root.collaborator_id);
    assert_eq!(with_root[0].depth, 0);

    let grandchildren =
        closure::descendants_at_depth(&conn, &root.collaborator_id, 2).expect("depth 2");
    assert_eq!(
        ids(&grandchildren),
        leaves.iter().map(String::as_str).collect::<Vec<_>>()
    );
}

#[test]
fn company_listing_is_scoped_and_ordered() {
    let (_dir, conn) = open_test_store();
    let k = store::create_company(&conn, "K").expect("create company");
    let z = store::create_company(&conn, "Z").expect("create company");

    let a = hire(&conn, &k, "A", "a@k.example");
    let b = hire(&conn, &k, "B", "b@k.example");
    hire(&conn, &z, "O", "o@z.example");

    let listed = store::list_collaborators(&conn, &k.company_id).expect("list");
    assert_eq!(
        ids(&listed),
        vec![a.collaborator_id.as_str(), b.collaborator_id.as_str()]
    );

    let companies = store::list_companies(&conn).expect("list companies");
    assert_eq!(companies.len(), 2);
    assert_eq!(companies[0].company_id, k.company_id);
}
