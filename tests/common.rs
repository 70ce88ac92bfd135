#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn pcl() -> Command {
    cargo_bin_cmd!("punchclock")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_punchclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema on a fresh test DB
pub fn init_test_db(db_path: &str) {
    pcl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub const ADA_TAG: &str = "04A224FF112233";

/// Register worker "Ada Lovelace" with her tag and the LAB-001 reader
pub fn seed_ada_and_lab(db_path: &str) {
    pcl()
        .args([
            "--db",
            db_path,
            "--test",
            "worker",
            "add",
            "--name",
            "Ada Lovelace",
            "--tag",
            ADA_TAG,
        ])
        .assert()
        .success();

    pcl()
        .args([
            "--db", db_path, "--test", "reader", "add", "--code", "LAB-001",
        ])
        .assert()
        .success();
}

/// Submit a punch with an explicit timestamp
pub fn punch_at(db_path: &str, tag: &str, reader: Option<&str>, at: &str) -> assert_cmd::assert::Assert {
    let mut args = vec!["--db", db_path, "--test", "punch", tag, "--at", at];
    if let Some(code) = reader {
        args.extend(["--reader", code]);
    }
    pcl().args(&args).assert()
}

/// Count rows of a table directly on the SQLite file
pub fn count_rows(db_path: &str, table: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
        .expect("count")
}

pub fn count_open_sessions(db_path: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row(
        "SELECT COUNT(*) FROM work_sessions WHERE end_utc IS NULL",
        [],
        |r| r.get(0),
    )
    .expect("count open")
}
