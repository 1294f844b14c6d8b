use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::OnceLock;

const MAX_OP_WIDTH: usize = 40;

fn ansi_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI regex"))
}

/// Printable width of a string that may contain ANSI escapes.
fn visible_len(s: &str) -> usize {
    ansi_re().replace_all(s, "").chars().count()
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "login" => Colour::Green,
        "login_failed" => Colour::Red,
        "logout" => Colour::Yellow,
        "session_expired" => Colour::RGB(255, 153, 51),
        "export" => Colour::Blue,
        "init" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        _ => Colour::White,
    }
}

fn op_label(e: &LogEntry) -> String {
    let colored = color_for_operation(&e.operation).paint(e.operation.as_str());
    if e.target.is_empty() {
        colored.to_string()
    } else {
        let mut target = e.target.clone();
        let room = MAX_OP_WIDTH.saturating_sub(e.operation.chars().count() + 3);
        if target.chars().count() > room {
            target = target.chars().take(room.saturating_sub(3)).collect::<String>() + "...";
        }
        format!("{colored} ({target})")
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let labels: Vec<String> = entries.iter().map(op_label).collect();
        let op_w = labels.iter().map(|l| visible_len(l)).max().unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(0);

        println!("📜 Internal log:\n");

        for (e, label) in entries.iter().zip(&labels) {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| e.date.clone());
            let padding = " ".repeat(op_w.saturating_sub(visible_len(label)));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                date,
                label,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
