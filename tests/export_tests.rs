use predicates::str::contains;

mod common;
use common::{Workspace, read};

#[test]
fn journal_csv_export_writes_sorted_aggregate() {
    let ws = Workspace::new();
    ws.login("bob@nc.org");
    let out = ws.out_file("journal.out.csv");

    ws.ncd()
        .args(["journal", "--export", "csv", "--file", &out, "--force"])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let text = read(std::path::Path::new(&out));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Date,Place,Count,Unique_places,SumMin,Latitude,Longitude");
    assert!(lines[1].starts_with("2024-01-01,Park,2,1,50,"));
    assert_eq!(lines[2], "2024-01-01,Beach,1,1,30,,");
    assert_eq!(lines.len(), 3);
}

#[test]
fn ratings_json_export() {
    let ws = Workspace::new();
    ws.login("ada@nc.org");
    let out = ws.out_file("ratings.json");

    ws.ncd()
        .args(["ratings", "--export", "json", "--file", &out, "--force"])
        .assert()
        .success();

    let rows: serde_json::Value = serde_json::from_str(&read(std::path::Path::new(&out))).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["Indicator"], "Calm");
    assert_eq!(rows[0]["Count"], 1);
}

#[test]
fn checkins_xlsx_export_creates_file() {
    let ws = Workspace::new();
    ws.login("ada@nc.org");
    let out = ws.out_file("sessions.xlsx");

    ws.ncd()
        .args(["checkins", "--export", "xlsx", "--file", &out, "--force"])
        .assert()
        .success();

    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn export_requires_absolute_path() {
    let ws = Workspace::new();
    ws.login("ada@nc.org");

    ws.ncd()
        .args(["journal", "--export", "csv", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn export_needs_a_file() {
    let ws = Workspace::new();

    ws.ncd()
        .args(["journal", "--export", "csv"])
        .assert()
        .failure();
}

#[test]
fn export_is_audited() {
    let ws = Workspace::new();
    ws.login("ada@nc.org");
    let out = ws.out_file("audit.csv");

    ws.ncd()
        .args(["journal", "--export", "csv", "--file", &out, "--force"])
        .assert()
        .success();

    ws.ncd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("export"));
}
