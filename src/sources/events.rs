use super::sheet::{Sheet, cell};
use crate::errors::{AppError, AppResult};
use crate::models::permission::normalize_email;
use crate::models::{DatasetKind, EventRecord};
use crate::utils::date::parse_timestamp;
use csv::StringRecord;
use std::path::Path;
use tracing::{debug, warn};

const COL_TIMESTAMP: &str = "Timestamp";
const COL_EMAIL: &str = "User email";

// journal sheet
const COL_PLACE: &str = "n_Place";
const COL_DURATION: &str = "n_Duration";
const COL_LATITUDE: &str = "n_Lati";
const COL_LONGITUDE: &str = "n_Long";

// check-in sheet
const COL_SESSION: &str = "Session id";
const COL_SHORT_SESSION: &str = "sess6digit";
const COL_INDICATOR: &str = "Indicator";
const COL_RATING: &str = "Rating";
const COL_COMPOSITE: &str = "composite_score";

/// Rows accepted from a data sheet, plus how many were rejected.
#[derive(Debug, Default)]
pub struct LoadedEvents {
    pub records: Vec<EventRecord>,
    pub rejected: usize,
}

struct Columns {
    timestamp: usize,
    email: usize,
    place: Option<usize>,
    duration: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
    session: Option<usize>,
    short_session: Option<usize>,
    indicator: Option<usize>,
    rating: Option<usize>,
    composite: Option<usize>,
}

impl Columns {
    fn resolve(sheet: &Sheet, kind: DatasetKind, path: &Path) -> AppResult<Self> {
        let mut cols = Columns {
            timestamp: sheet.require(COL_TIMESTAMP, path)?,
            email: sheet.require(COL_EMAIL, path)?,
            place: None,
            duration: None,
            latitude: None,
            longitude: None,
            session: None,
            short_session: None,
            indicator: None,
            rating: None,
            composite: None,
        };

        match kind {
            DatasetKind::Journal => {
                cols.place = Some(sheet.require(COL_PLACE, path)?);
                cols.duration = Some(sheet.require(COL_DURATION, path)?);
                cols.latitude = sheet.column(COL_LATITUDE);
                cols.longitude = sheet.column(COL_LONGITUDE);
            }
            DatasetKind::CheckIn => {
                cols.session = sheet.column(COL_SESSION);
                cols.short_session = sheet.column(COL_SHORT_SESSION);
                if cols.session.is_none() && cols.short_session.is_none() {
                    return Err(AppError::LoadError(format!(
                        "{}: missing column '{COL_SESSION}' or '{COL_SHORT_SESSION}'",
                        path.display()
                    )));
                }
                cols.indicator = sheet.column(COL_INDICATOR);
                cols.rating = sheet.column(COL_RATING);
                cols.composite = sheet.column(COL_COMPOSITE);
            }
        }

        Ok(cols)
    }
}

/// Load a journal or check-in sheet export.
///
/// A row is rejected when its timestamp or user email is missing, or when a
/// numeric cell does not parse. Blank optional cells are kept as `None`.
pub fn load_events(path: &Path, kind: DatasetKind, header_row: usize) -> AppResult<LoadedEvents> {
    let sheet = Sheet::read(path, header_row)?;
    let cols = Columns::resolve(&sheet, kind, path)?;

    let mut loaded = LoadedEvents::default();
    for (line, row) in sheet.rows.iter().enumerate() {
        match parse_row(row, &cols) {
            Some(ev) => loaded.records.push(ev),
            None => {
                warn!(row = line + 1, dataset = kind.label(), "invalid row rejected");
                loaded.rejected += 1;
            }
        }
    }

    debug!(
        dataset = kind.label(),
        accepted = loaded.records.len(),
        rejected = loaded.rejected,
        "events loaded"
    );
    Ok(loaded)
}

fn parse_row(row: &StringRecord, cols: &Columns) -> Option<EventRecord> {
    let timestamp = parse_timestamp(cell(row, Some(cols.timestamp))?)?;
    let email = normalize_email(cell(row, Some(cols.email))?);

    let mut ev = EventRecord::new(timestamp, &email);
    ev.place = cell(row, cols.place).map(str::to_string);
    ev.duration_minutes = match cell(row, cols.duration) {
        Some(raw) => parse_minutes(raw)?,
        None => 0,
    };
    ev.latitude = parse_opt_f64(row, cols.latitude)?;
    ev.longitude = parse_opt_f64(row, cols.longitude)?;
    ev.session_id = cell(row, cols.session).map(str::to_string);
    ev.short_session_id = cell(row, cols.short_session).map(str::to_string);
    ev.indicator = cell(row, cols.indicator).map(str::to_string);
    ev.rating = parse_opt_f64(row, cols.rating)?;
    ev.composite_score = parse_opt_f64(row, cols.composite)?;

    Some(ev)
}

/// Whole minutes; spreadsheets often store them as `30.0`.
fn parse_minutes(raw: &str) -> Option<i64> {
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.round() as i64))
}

/// `Some(None)` for a blank cell, `None` for an unparsable one.
fn parse_opt_f64(row: &StringRecord, idx: Option<usize>) -> Option<Option<f64>> {
    match cell(row, idx) {
        None => Some(None),
        Some(raw) => raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(Some),
    }
}
