use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::Workspace;

#[test]
fn report_requires_login() {
    let ws = Workspace::new();

    ws.ncd()
        .arg("ratings")
        .assert()
        .failure()
        .stderr(contains("Please log in first"));
}

#[test]
fn user_journal_is_scoped_to_own_rows() {
    let ws = Workspace::new();
    ws.login("bob@nc.org");

    ws.ncd()
        .arg("journal")
        .assert()
        .success()
        .stdout(contains("You are logged in under bob@nc.org as user"))
        .stdout(contains("Park").and(contains("Beach")))
        .stdout(contains("Forest").not())
        .stdout(contains("1h 20m"));
}

#[test]
fn admin_journal_sees_everyone() {
    let ws = Workspace::new();
    ws.login("ada@nc.org");

    ws.ncd()
        .arg("journal")
        .assert()
        .success()
        .stdout(contains("Forest").and(contains("Park")))
        .stdout(contains("2h 5m"));
}

#[test]
fn user_cannot_filter_by_email() {
    let ws = Workspace::new();
    ws.login("bob@nc.org");

    ws.ncd()
        .args(["journal", "--email", "ada@nc.org"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));
}

#[test]
fn admin_email_filter_narrows_rows() {
    let ws = Workspace::new();
    ws.login("ada@nc.org");

    ws.ncd()
        .args(["journal", "--email", "BOB@nc.org"])
        .assert()
        .success()
        .stdout(contains("Park").and(contains("Forest").not()));
}

#[test]
fn more_than_three_emails_is_rejected() {
    let ws = Workspace::new();
    ws.login("ada@nc.org");

    ws.ncd()
        .args([
            "journal", "--email", "a@x.org", "--email", "b@x.org", "--email", "c@x.org",
            "--email", "d@x.org",
        ])
        .assert()
        .failure()
        .stderr(contains("Too many emails selected: 4"));
}

#[test]
fn top_n_outside_range_is_rejected() {
    let ws = Workspace::new();
    ws.login("ada@nc.org");

    ws.ncd()
        .args(["journal", "--top", "20"])
        .assert()
        .failure()
        .stderr(contains("Invalid Top N value 20"));

    ws.ncd()
        .args(["journal", "--top", "1"])
        .assert()
        .success()
        .stdout(contains("Top 1 Places by Time Spent"));
}

#[test]
fn empty_window_prints_no_data() {
    let ws = Workspace::new();
    ws.login("ada@nc.org");

    ws.ncd()
        .args(["journal", "--range", "2030"])
        .assert()
        .success()
        .stdout(contains("No data found for the selected filters."));
}

#[test]
fn reversed_window_prints_no_data() {
    let ws = Workspace::new();
    ws.login("ada@nc.org");

    ws.ncd()
        .args(["journal", "--from", "2024-02-01", "--to", "2024-01-01"])
        .assert()
        .success()
        .stdout(contains("No data found for the selected filters."));
}

#[test]
fn date_only_upper_bound_includes_that_day() {
    let ws = Workspace::new();
    ws.login("bob@nc.org");

    // Park rows are at 10:00 and 15:00 on the last included day
    ws.ncd()
        .args(["journal", "--from", "2024-01-01", "--to", "2024-01-01"])
        .assert()
        .success()
        .stdout(contains("1h 20m"));
}

#[test]
fn range_conflicts_with_from() {
    let ws = Workspace::new();

    ws.ncd()
        .args(["journal", "--range", "2024", "--from", "2024-01-01"])
        .assert()
        .failure();
}

#[test]
fn checkins_rollups_label_week_by_sunday() {
    let ws = Workspace::new();
    ws.login("ada@nc.org");

    ws.ncd()
        .arg("checkins")
        .assert()
        .success()
        .stdout(contains("Unique Sessions per Week"))
        .stdout(contains("2024-01-07"))
        .stdout(contains("2024-01-31").and(contains("2024-12-31")));
}

#[test]
fn ratings_indicator_filter_and_means() {
    let ws = Workspace::new();
    ws.login("ada@nc.org");

    ws.ncd()
        .args(["ratings", "--indicator", "Calm"])
        .assert()
        .success()
        .stdout(contains("Average Rating"))
        .stdout(contains("3.50").and(contains("3.00")))
        .stdout(contains("Joy").not());
}

#[test]
fn user_cannot_filter_by_indicator() {
    let ws = Workspace::new();
    ws.login("bob@nc.org");

    ws.ncd()
        .args(["ratings", "--indicator", "Calm"])
        .assert()
        .failure()
        .stderr(contains("admins only"));
}

#[test]
fn removed_user_session_expires_on_next_report() {
    let ws = Workspace::new();
    ws.login("bob@nc.org");

    std::fs::write(
        ws.path("permissions.csv"),
        "email,role,name\nada@nc.org,admin,Ada\n",
    )
    .unwrap();
    std::fs::write(
        ws.path("ncdash.conf"),
        std::fs::read_to_string(ws.path("ncdash.conf")).unwrap() + "permission_ttl_secs: 0\n",
    )
    .unwrap();

    ws.ncd()
        .arg("journal")
        .assert()
        .failure()
        .stderr(contains("Please log in first"));

    ws.ncd()
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("Not logged in."));
}

#[test]
fn checkins_count_full_session_ids() {
    let ws = Workspace::new();
    std::fs::write(
        ws.path("checkins.csv"),
        "Timestamp,User email,Session id,sess6digit,Indicator,Rating,composite_score\n\
         2024-01-01 10:00:00,ada@nc.org,S-1,100001,Calm,4,3.5\n\
         2024-01-01 11:00:00,ada@nc.org,S-2,100001,Calm,2,1.5\n",
    )
    .unwrap();
    ws.login("ada@nc.org");

    let out = ws.out_file("rollups.csv");
    ws.ncd()
        .args(["checkins", "--export", "csv", "--file", &out, "--force"])
        .assert()
        .success();
    let text = common::read(std::path::Path::new(&out));
    assert!(text.contains("day,2024-01-01,2"));
    assert!(text.contains("week,2024-01-07,2"));

    let out = ws.out_file("ratings.csv");
    ws.ncd()
        .args(["ratings", "--export", "csv", "--file", &out, "--force"])
        .assert()
        .success();
    let text = common::read(std::path::Path::new(&out));
    assert!(text.contains("2024-01-01,Calm,1,"));
}
