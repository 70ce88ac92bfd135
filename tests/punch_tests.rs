use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{
    ADA_TAG, count_open_sessions, count_rows, init_test_db, pcl, punch_at, seed_ada_and_lab,
    setup_test_db,
};

#[test]
fn test_punch_open_ignore_close_scenario() {
    let db_path = setup_test_db("punch_scenario");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    // Punch 1 → opens a session
    punch_at(&db_path, ADA_TAG, Some("LAB-001"), "2025-09-24T08:00:00Z")
        .success()
        .stdout(contains("opened"));

    // Punch 2, 200ms later on the same reader → debounced
    punch_at(
        &db_path,
        ADA_TAG,
        Some("LAB-001"),
        "2025-09-24T08:00:00.200Z",
    )
    .success()
    .stdout(contains("Duplicate scan ignored"));

    // Punch 3, six seconds after the first → closes the session
    punch_at(&db_path, ADA_TAG, Some("LAB-001"), "2025-09-24T08:00:06Z")
        .success()
        .stdout(contains("closed after 6s"));

    // the ignored tap wrote nothing: two scans, one closed session
    assert_eq!(count_rows(&db_path, "scans"), 2);
    assert_eq!(count_rows(&db_path, "work_sessions"), 1);
    assert_eq!(count_open_sessions(&db_path), 0);
}

#[test]
fn test_punches_alternate_open_close() {
    let db_path = setup_test_db("punch_alternation");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    let times = [
        ("2025-09-24T08:00:00Z", "opened"),
        ("2025-09-24T09:00:00Z", "closed"),
        ("2025-09-24T10:00:00Z", "opened"),
        ("2025-09-24T11:00:00Z", "closed"),
    ];

    for (at, expected) in times {
        punch_at(&db_path, ADA_TAG, Some("LAB-001"), at)
            .success()
            .stdout(contains(expected));
    }

    assert_eq!(count_rows(&db_path, "work_sessions"), 2);
    assert_eq!(count_open_sessions(&db_path), 0);
    assert_eq!(count_rows(&db_path, "scans"), 4);
}

#[test]
fn test_unknown_tag_writes_nothing() {
    let db_path = setup_test_db("punch_unknown_tag");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    punch_at(&db_path, "DEADBEEF", Some("LAB-001"), "2025-09-24T08:00:00Z")
        .failure()
        .stderr(contains("Unknown tag 'DEADBEEF'"));

    assert_eq!(count_rows(&db_path, "scans"), 0);
    assert_eq!(count_rows(&db_path, "work_sessions"), 0);
}

#[test]
fn test_unknown_reader_is_not_provisioned() {
    let db_path = setup_test_db("punch_unknown_reader");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    punch_at(&db_path, ADA_TAG, Some("GHOST-9"), "2025-09-24T08:00:00Z")
        .failure()
        .stderr(contains("Unknown reader 'GHOST-9'"));

    // no scan recorded and no reader silently created
    assert_eq!(count_rows(&db_path, "scans"), 0);
    assert_eq!(count_rows(&db_path, "readers"), 1);
}

#[test]
fn test_malformed_tag_is_a_validation_error() {
    let db_path = setup_test_db("punch_malformed_tag");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    punch_at(&db_path, "NOT-HEX", Some("LAB-001"), "2025-09-24T08:00:00Z")
        .failure()
        .stderr(contains("Validation error"));

    assert_eq!(count_rows(&db_path, "scans"), 0);
}

#[test]
fn test_reader_less_punch_is_valid() {
    let db_path = setup_test_db("punch_readerless");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    punch_at(&db_path, ADA_TAG, None, "2025-09-24T08:00:00Z")
        .success()
        .stdout(contains("opened"));

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let reader_id: Option<i64> = conn
        .query_row("SELECT reader_id FROM scans LIMIT 1", [], |r| r.get(0))
        .expect("scan row");
    assert_eq!(reader_id, None);
}

#[test]
fn test_tag_is_normalized_before_lookup() {
    let db_path = setup_test_db("punch_normalized");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    // lowercase with stray whitespace still resolves
    punch_at(&db_path, " 04a224ff112233 ", Some("LAB-001"), "2025-09-24T08:00:00Z")
        .success()
        .stdout(contains("opened"));
}

#[test]
fn test_punch_json_outcome() {
    let db_path = setup_test_db("punch_json");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    pcl()
        .args([
            "--db",
            &db_path,
            "--test",
            "punch",
            ADA_TAG,
            "--reader",
            "LAB-001",
            "--at",
            "2025-09-24T08:00:00Z",
            "--json",
        ])
        .assert()
        .success()
        .stdout(contains("\"action\": \"opened\""))
        .stdout(contains("\"session_id\""));

    pcl()
        .args([
            "--db",
            &db_path,
            "--test",
            "punch",
            ADA_TAG,
            "--reader",
            "LAB-001",
            "--at",
            "2025-09-24T08:00:06Z",
            "--json",
        ])
        .assert()
        .success()
        .stdout(contains("\"action\": \"closed\""))
        .stdout(contains("\"duration_seconds\": 6"));
}

#[test]
fn test_clock_skew_on_another_reader_closes_with_warning() {
    let db_path = setup_test_db("punch_clock_skew");
    init_test_db(&db_path);
    seed_ada_and_lab(&db_path);

    pcl()
        .args([
            "--db", &db_path, "--test", "reader", "add", "--code", "GATE-001",
        ])
        .assert()
        .success();

    // open on the lab reader
    punch_at(&db_path, ADA_TAG, Some("LAB-001"), "2025-09-24T08:00:00Z")
        .success()
        .stdout(contains("opened"));

    // the gate device's clock runs 10 seconds behind
    punch_at(&db_path, ADA_TAG, Some("GATE-001"), "2025-09-24T07:59:50Z")
        .success()
        .stdout(contains("Clock anomaly").and(contains("closed")));

    // session closed anyway; the anomaly landed in the audit log
    assert_eq!(count_open_sessions(&db_path), 0);

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let anomalies: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'clock_anomaly'",
            [],
            |r| r.get(0),
        )
        .expect("log rows");
    assert_eq!(anomalies, 1);
}

#[test]
fn test_punches_by_different_workers_are_not_debounced() {
    let db_path = setup_test_db("punch_two_workers");
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
            "BBAA99887766",
        ])
        .assert()
        .success();

    // back-to-back punches on the same reader by different workers
    punch_at(&db_path, ADA_TAG, Some("LAB-001"), "2025-09-24T08:00:00Z")
        .success()
        .stdout(contains("opened"));
    punch_at(&db_path, "BBAA99887766", Some("LAB-001"), "2025-09-24T08:00:01Z")
        .success()
        .stdout(contains("opened"));

    assert_eq!(count_open_sessions(&db_path), 2);
}
