use crate::status::{DisplayStyle, SummaryBucket};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One member-day as returned by the attendance-history backend.
///
/// Only `date` and `status` drive the calendar; everything else is carried
/// through untouched so the page can show it in the day detail.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", from = "RawAttendanceRecord")]
pub struct AttendanceRecord {
    pub date: Option<String>,
    pub status: Option<String>,
    pub time_in: Option<String>,
    pub time_out: Option<String>,
    pub remarks: Option<String>,
    pub correction_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire shape. Some backends send the date as `dt`; both keys may be
/// present, in which case a usable `date` wins.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAttendanceRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    dt: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    time_in: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    time_out: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    remarks: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    correction_reason: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawAttendanceRecord> for AttendanceRecord {
    fn from(raw: RawAttendanceRecord) -> Self {
        Self {
            date: raw.date.or(raw.dt),
            status: raw.status,
            time_in: raw.time_in,
            time_out: raw.time_out,
            remarks: raw.remarks,
            correction_reason: raw.correction_reason,
            extra: raw.extra,
        }
    }
}

impl AttendanceRecord {
    pub fn new(date: &str, status: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            status: Some(status.to_string()),
            ..Self::default()
        }
    }
}

/// Accepts `"text"`, `{ "value": "text" }`, numbers or null. Anything else,
/// and blank text, becomes `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(unwrap_text(&raw))
}

fn unwrap_text(raw: &Value) -> Option<String> {
    let text = match raw {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Object(map) => return map.get("value").and_then(unwrap_text),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Response shape of the attendance-history API. The server-side `summary`
/// is accepted but never trusted.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AttendanceHistory {
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
    #[serde(default)]
    pub summary: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AttendanceStore {
    pub members: BTreeMap<String, Vec<AttendanceRecord>>,
}

impl AttendanceStore {
    /// Merges `records` into the member's history. A record replaces any
    /// stored record with the same date; undated records are dropped.
    /// Returns the member's record count afterwards.
    pub fn merge(&mut self, member: &str, records: Vec<AttendanceRecord>) -> usize {
        let history = self.members.entry(member.to_string()).or_default();
        for record in records {
            let Some(date) = record.date.as_deref() else {
                continue;
            };
            history.retain(|existing| existing.date.as_deref() != Some(date));
            history.push(record);
        }
        history.sort_by(|a, b| a.date.cmp(&b.date));
        history.len()
    }
}

/// Derived counters for one month. `total` counts every record, including
/// those that fall in no bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub present: usize,
    pub absent: usize,
    pub double_absent: usize,
    pub half_day: usize,
    pub miss: usize,
    pub total: usize,
}

impl Summary {
    pub fn count(&mut self, bucket: SummaryBucket) {
        let counter = match bucket {
            SummaryBucket::Present => &mut self.present,
            SummaryBucket::Absent => &mut self.absent,
            SummaryBucket::DoubleAbsent => &mut self.double_absent,
            SummaryBucket::HalfDay => &mut self.half_day,
            SummaryBucket::Miss => &mut self.miss,
        };
        *counter += 1;
    }

    /// Absent and double absent combined, as shown on the "not completed" card.
    pub fn not_completed(&self) -> usize {
        self.absent + self.double_absent
    }
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub status: Option<String>,
    pub normalized: String,
    pub style: DisplayStyle,
    pub label: &'static str,
    pub bucket: Option<SummaryBucket>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarRequest {
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
    #[serde(default)]
    pub summary: Option<Value>,
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub today: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    #[serde(default)]
    pub month: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CellView {
    pub day: Option<u32>,
    pub date: Option<String>,
    pub is_future: bool,
    pub record: Option<AttendanceRecord>,
    pub style: Option<DisplayStyle>,
    pub label: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SummaryView {
    #[serde(flatten)]
    pub counts: Summary,
    pub not_completed: usize,
}

impl From<Summary> for SummaryView {
    fn from(counts: Summary) -> Self {
        Self {
            not_completed: counts.not_completed(),
            counts,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
    pub today: String,
    pub leading_blanks: u32,
    pub cells: Vec<CellView>,
    pub summary: SummaryView,
}

#[derive(Debug, Serialize)]
pub struct MemberEntry {
    pub member: String,
    pub records: usize,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub member: String,
    pub received: usize,
    pub records: usize,
}
