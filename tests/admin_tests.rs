use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{ADA_TAG, count_rows, init_test_db, pcl, punch_at, seed_ada_and_lab, setup_test_db};

#[test]
fn test_worker_list_shows_open_session_marker() {
    let db_path = setup_test_db("admin_worker_list");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    pcl()
        .args(["--db", &db_path, "--test", "worker", "list"])
        .assert()
        .success()
        .stdout(contains("Ada Lovelace"))
        .stdout(contains(ADA_TAG))
        .stdout(contains("open").not());

    punch_at(&db_path, ADA_TAG, Some("LAB-001"), "2025-09-24T08:00:00Z").success();

    pcl()
        .args(["--db", &db_path, "--test", "worker", "list"])
        .assert()
        .success()
        .stdout(contains("open"));
}

#[test]
fn test_duplicate_tag_assignment_is_rejected() {
    let db_path = setup_test_db("admin_duplicate_tag");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    pcl()
        .args([
            "--db",
            &db_path,
            "--test",
            "worker",
            "add",
            "--name",
            "Grace Hopper",
            "--tag",
            "04a224ff112233", // same UID, different case
        ])
        .assert()
        .failure()
        .stderr(contains("already assigned"));

    assert_eq!(count_rows(&db_path, "workers"), 1);
}

#[test]
fn test_worker_with_history_cannot_be_deleted() {
    let db_path = setup_test_db("admin_delete_history");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    punch_at(&db_path, ADA_TAG, Some("LAB-001"), "2025-09-24T08:00:00Z").success();

    pcl()
        .args(["--db", &db_path, "--test", "worker", "del", "1"])
        .assert()
        .failure()
        .stderr(contains("session history"));

    assert_eq!(count_rows(&db_path, "workers"), 1);
    assert_eq!(count_rows(&db_path, "work_sessions"), 1);
}

#[test]
fn test_worker_without_history_can_be_deleted() {
    let db_path = setup_test_db("admin_delete_fresh");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    pcl()
        .args(["--db", &db_path, "--test", "worker", "del", "1"])
        .assert()
        .success()
        .stdout(contains("deleted"));

    assert_eq!(count_rows(&db_path, "workers"), 0);
}

#[test]
fn test_clearing_a_tag_unbinds_the_worker() {
    let db_path = setup_test_db("admin_clear_tag");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    pcl()
        .args([
            "--db", &db_path, "--test", "worker", "set", "1", "--clear-tag",
        ])
        .assert()
        .success();

    // the tag no longer resolves
    punch_at(&db_path, ADA_TAG, Some("LAB-001"), "2025-09-24T08:00:00Z")
        .failure()
        .stderr(contains("Unknown tag"));
}

#[test]
fn test_deactivated_worker_tag_stops_resolving() {
    let db_path = setup_test_db("admin_inactive_worker");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    pcl()
        .args([
            "--db", &db_path, "--test", "worker", "set", "1", "--inactive",
        ])
        .assert()
        .success();

    punch_at(&db_path, ADA_TAG, Some("LAB-001"), "2025-09-24T08:00:00Z")
        .failure()
        .stderr(contains("Unknown tag"));
}

#[test]
fn test_deleting_a_reader_preserves_history() {
    let db_path = setup_test_db("admin_reader_delete");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    punch_at(&db_path, ADA_TAG, Some("LAB-001"), "2025-09-24T08:00:00Z").success();
    punch_at(&db_path, ADA_TAG, Some("LAB-001"), "2025-09-24T09:00:00Z").success();

    pcl()
        .args(["--db", &db_path, "--test", "reader", "del", "1"])
        .assert()
        .success()
        .stdout(contains("history preserved"));

    // scans and the session survive with a null reader reference
    assert_eq!(count_rows(&db_path, "scans"), 2);
    assert_eq!(count_rows(&db_path, "work_sessions"), 1);

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let dangling: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM scans WHERE reader_id IS NOT NULL",
            [],
            |r| r.get(0),
        )
        .expect("count");
    assert_eq!(dangling, 0);
}

#[test]
fn test_reader_with_location_shows_in_list() {
    let db_path = setup_test_db("admin_reader_location");
    init_test_db(&db_path);

    pcl()
        .args([
            "--db",
            &db_path,
            "--test",
            "reader",
            "add",
            "--code",
            "hq-gate",
            "--name",
            "HQ Gate",
            "--location",
            "Headquarters",
        ])
        .assert()
        .success()
        .stdout(contains("HQ-GATE"));

    pcl()
        .args(["--db", &db_path, "--test", "reader", "list"])
        .assert()
        .success()
        .stdout(contains("HQ-GATE"))
        .stdout(contains("Headquarters"));

    pcl()
        .args(["--db", &db_path, "--test", "location", "list"])
        .assert()
        .success()
        .stdout(contains("Headquarters"));
}

#[test]
fn test_sessions_and_scans_listings() {
    let db_path = setup_test_db("admin_listings");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    punch_at(&db_path, ADA_TAG, Some("LAB-001"), "2025-09-24T08:00:00Z").success();
    punch_at(&db_path, ADA_TAG, Some("LAB-001"), "2025-09-24T16:30:00Z").success();
    punch_at(&db_path, ADA_TAG, Some("LAB-001"), "2025-09-25T08:00:00Z").success();

    pcl()
        .args(["--db", &db_path, "--test", "sessions"])
        .assert()
        .success()
        .stdout(contains("Ada Lovelace"))
        .stdout(contains("8h 30m 00s"))
        .stdout(contains("open"));

    // only the still-open one
    pcl()
        .args(["--db", &db_path, "--test", "sessions", "--open"])
        .assert()
        .success()
        .stdout(contains("2025-09-25"))
        .stdout(contains("2025-09-24T08:00").not());

    pcl()
        .args(["--db", &db_path, "--test", "scans", "--worker", "1"])
        .assert()
        .success()
        .stdout(contains("in"))
        .stdout(contains("out"))
        .stdout(contains("nfc"));
}
