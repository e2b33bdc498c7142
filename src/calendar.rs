use crate::models::{AttendanceRecord, CalendarView, CellView, Summary};
use crate::status::{bucket, classify, label};
use chrono::{Datelike, Local, NaiveDate};
use std::collections::HashMap;
use tracing::{debug, warn};

/// One square of the month grid. Leading blanks have no day and no date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarCell<'a> {
    pub day: Option<u32>,
    pub date: Option<NaiveDate>,
    pub record: Option<&'a AttendanceRecord>,
    pub is_future: bool,
}

impl CalendarCell<'_> {
    fn blank() -> Self {
        Self {
            day: None,
            date: None,
            record: None,
            is_future: false,
        }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `month` is 1-based. `None` for an impossible year/month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

/// Blank cells before the 1st, with weeks starting on Sunday.
pub fn leading_blanks(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|first| first.weekday().num_days_from_sunday())
}

/// Parses a month anchor such as `2025-03-01` or `2025-03` into `(year, month)`.
pub fn parse_month_anchor(anchor: &str) -> Option<(i32, u32)> {
    let anchor = anchor.trim();
    NaiveDate::parse_from_str(anchor, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{anchor}-01"), "%Y-%m-%d"))
        .ok()
        .map(|date| (date.year(), date.month()))
}

/// Date-keyed lookup. Later records win over earlier ones with the same
/// date; undated records are skipped.
pub fn index_by_date(records: &[AttendanceRecord]) -> HashMap<&str, &AttendanceRecord> {
    records
        .iter()
        .filter_map(|record| record.date.as_deref().map(|date| (date, record)))
        .collect()
}

/// Records whose date falls inside the given month.
pub fn records_in_month(records: &[AttendanceRecord], year: i32, month: u32) -> Vec<AttendanceRecord> {
    let prefix = format!("{year:04}-{month:02}-");
    records
        .iter()
        .filter(|record| {
            record
                .date
                .as_deref()
                .is_some_and(|date| date.starts_with(&prefix))
        })
        .cloned()
        .collect()
}

pub fn build_grid(
    records: &[AttendanceRecord],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Vec<CalendarCell<'_>> {
    let (Some(blanks), Some(days)) = (leading_blanks(year, month), days_in_month(year, month)) else {
        warn!(year, month, "invalid calendar month, rendering empty grid");
        return Vec::new();
    };

    let by_date = index_by_date(records);
    let mut cells = Vec::with_capacity((blanks + days) as usize);
    cells.extend((0..blanks).map(|_| CalendarCell::blank()));

    for date in (1..=days).filter_map(|day| NaiveDate::from_ymd_opt(year, month, day)) {
        cells.push(CalendarCell {
            day: Some(date.day()),
            date: Some(date),
            record: by_date.get(date_key(date).as_str()).copied(),
            is_future: date > today,
        });
    }

    debug!(year, month, blanks, days, records = records.len(), "built calendar grid");
    cells
}

pub fn summarize(records: &[AttendanceRecord]) -> Summary {
    let mut summary = Summary {
        total: records.len(),
        ..Summary::default()
    };
    for record in records {
        if let Some(bucket) = bucket(record.status.as_deref()) {
            summary.count(bucket);
        }
    }
    summary
}

/// Grid, per-cell styles and summary for one member-month.
pub fn month_view(records: &[AttendanceRecord], year: i32, month: u32, today: NaiveDate) -> CalendarView {
    let cells = build_grid(records, year, month, today)
        .into_iter()
        .map(|cell| {
            let status = cell.record.and_then(|record| record.status.as_deref());
            CellView {
                day: cell.day,
                date: cell.date.map(date_key),
                is_future: cell.is_future,
                record: cell.record.cloned(),
                style: cell.record.map(|_| classify(status)),
                label: cell.record.map(|_| label(status)),
            }
        })
        .collect();

    CalendarView {
        year,
        month,
        today: date_key(today),
        leading_blanks: leading_blanks(year, month).unwrap_or(0),
        cells,
        summary: summarize(records).into(),
    }
}
