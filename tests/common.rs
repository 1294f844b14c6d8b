#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PERMISSIONS: &str = "\
email,role,name
ada@nc.org,admin,Ada
bob@nc.org,user,Bob
";

/// Journal export with the title line that precedes the header.
pub const JOURNAL: &str = "\
Nature Journal responses
Timestamp,User email,n_Place,n_Duration,n_Lati,n_Long
2024-01-01 10:00:00,bob@nc.org,Park,20,40.0,-74.0
2024-01-01 15:00:00,bob@nc.org,Park,30,40.2,-74.2
2024-01-01 12:00:00,bob@nc.org,Beach,30,,
2024-01-02 09:00:00,ada@nc.org,Forest,45,41.0,-73.0
";

pub const CHECKINS: &str = "\
Timestamp,User email,Session id,sess6digit,Indicator,Rating,composite_score
2024-01-01 10:00:00,bob@nc.org,S-1,100001,Calm,4,3.5
2024-01-01 10:05:00,bob@nc.org,S-1,100001,Joy,5,4.5
2024-01-03 10:00:00,ada@nc.org,S-2,100002,Calm,3,2.5
";

/// A throwaway config, database and set of sheet exports.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let ws = Self { dir };

        fs::write(ws.path("permissions.csv"), PERMISSIONS).expect("write permissions");
        fs::write(ws.path("journal.csv"), JOURNAL).expect("write journal");
        fs::write(ws.path("checkins.csv"), CHECKINS).expect("write checkins");

        let conf = format!(
            "database: {}\npermissions_file: {}\njournal_file: {}\ncheckin_file: {}\njournal_header_row: 1\ncheckin_header_row: 0\n",
            ws.path("ncdash.sqlite").display(),
            ws.path("permissions.csv").display(),
            ws.path("journal.csv").display(),
            ws.path("checkins.csv").display(),
        );
        fs::write(ws.path("ncdash.conf"), conf).expect("write config");
        ws
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// `ncdash --config <ws>/ncdash.conf ...`
    pub fn ncd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("ncdash");
        cmd.arg("--config").arg(self.path("ncdash.conf"));
        cmd
    }

    pub fn login(&self, email: &str) {
        self.ncd().args(["login", email]).assert().success();
    }

    pub fn out_file(&self, name: &str) -> String {
        self.path(name).to_string_lossy().to_string()
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read output")
}
