#![allow(dead_code)]
use assert_cmd::{cargo_bin_cmd, Command};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn pnt() -> Command {
    cargo_bin_cmd!("puntual")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_puntual.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize DB and record one complete working day for person 7
pub fn init_db_with_data(db_path: &str) {
    pnt()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (time, motive) in [
        ("08:00", "entrada"),
        ("13:00", "salida de comida"),
        ("13:30", "entrada de comida"),
        ("17:00", "salida"),
    ] {
        pnt()
            .args([
                "--db",
                db_path,
                "--test",
                "clock",
                "7",
                "--date",
                "2025-09-01",
                "--time",
                time,
                "--motive",
                motive,
            ])
            .assert()
            .success();
    }
}

/// Open a direct connection to a test DB with the schema in place
pub fn open_initialized(db_path: &str) -> rusqlite::Connection {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    puntual::db::initialize::init_db(&conn).expect("init db");
    conn
}
