//! Attendance status classification.
//!
//! A single ordered rule table maps a raw backend status to the calendar
//! cell style and to the summary bucket it is counted in. Rules are tried
//! top to bottom and the first match wins; exact spellings come first and
//! the substring fallbacks only see what none of them caught.

use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    Green,
    Red,
    Yellow,
    Orange,
    Blue,
    Purple,
    Muted,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DotColor {
    White,
    Blue,
    Black,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dot {
    pub color: DotColor,
    pub count: u8,
}

/// Background plus the dots drawn on top of it, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayStyle {
    pub background: Background,
    pub dots: &'static [Dot],
}

impl DisplayStyle {
    const fn plain(background: Background) -> Self {
        Self {
            background,
            dots: &[],
        }
    }

    const fn dotted(background: Background, dots: &'static [Dot]) -> Self {
        Self { background, dots }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryBucket {
    Present,
    Absent,
    DoubleAbsent,
    HalfDay,
    Miss,
}

#[derive(Debug, Clone, Copy)]
enum Matcher {
    /// Normalized status equals one of these.
    Exact(&'static [&'static str]),
    /// Normalized status contains every one of these.
    ContainsAll(&'static [&'static str]),
}

impl Matcher {
    fn matches(&self, normalized: &str) -> bool {
        match self {
            Matcher::Exact(spellings) => spellings.contains(&normalized),
            Matcher::ContainsAll(needles) => needles.iter().all(|needle| normalized.contains(needle)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct StatusRule {
    matcher: Matcher,
    style: DisplayStyle,
    bucket: Option<SummaryBucket>,
}

const BLACK_PAIR: &[Dot] = &[Dot {
    color: DotColor::Black,
    count: 2,
}];
const WHITE_DOT: &[Dot] = &[Dot {
    color: DotColor::White,
    count: 1,
}];
const BLUE_DOT: &[Dot] = &[Dot {
    color: DotColor::Blue,
    count: 1,
}];
const GRAY_DOT: &[Dot] = &[Dot {
    color: DotColor::Gray,
    count: 1,
}];

const fn rule(matcher: Matcher, style: DisplayStyle, bucket: Option<SummaryBucket>) -> StatusRule {
    StatusRule {
        matcher,
        style,
        bucket,
    }
}

use Background::*;
use SummaryBucket::*;

const RULES: &[StatusRule] = &[
    rule(
        Matcher::Exact(&["DOUBLE ABSENT", "DOUBLE A"]),
        DisplayStyle::dotted(Red, BLACK_PAIR),
        Some(DoubleAbsent),
    ),
    rule(
        Matcher::ContainsAll(&["DOUBLE"]),
        DisplayStyle::dotted(Red, BLACK_PAIR),
        Some(DoubleAbsent),
    ),
    rule(Matcher::Exact(&["ABSENT"]), DisplayStyle::plain(Red), Some(Absent)),
    rule(Matcher::Exact(&["PRESENT"]), DisplayStyle::plain(Green), Some(Present)),
    rule(
        Matcher::Exact(&["PRESENT LATE"]),
        DisplayStyle::dotted(Green, WHITE_DOT),
        Some(Present),
    ),
    rule(
        Matcher::Exact(&["PRESENT EARLY_OUT", "PRESENT E"]),
        DisplayStyle::dotted(Green, BLUE_DOT),
        Some(Present),
    ),
    rule(
        Matcher::Exact(&["PRESENT LATE EARLY_OUT", "PRESENT L"]),
        DisplayStyle::dotted(Green, BLUE_DOT),
        Some(Present),
    ),
    rule(Matcher::Exact(&["HALFDAY", "HALF DAY"]), DisplayStyle::plain(Yellow), Some(HalfDay)),
    rule(
        Matcher::Exact(&["MISS OUT", "MISS IN"]),
        DisplayStyle::dotted(Orange, BLUE_DOT),
        Some(Miss),
    ),
    rule(
        Matcher::Exact(&["MISS PENDING", "MISS PEND"]),
        DisplayStyle::dotted(Muted, GRAY_DOT),
        Some(Miss),
    ),
    rule(Matcher::Exact(&["LEAVE"]), DisplayStyle::plain(Blue), None),
    rule(Matcher::Exact(&["WEEKLY OFF", "WO"]), DisplayStyle::plain(Purple), None),
    // substring fallbacks
    rule(
        Matcher::ContainsAll(&["PRESENT", "LATE", "EARLY"]),
        DisplayStyle::dotted(Green, BLUE_DOT),
        Some(Present),
    ),
    rule(
        Matcher::ContainsAll(&["PRESENT", "LATE"]),
        DisplayStyle::dotted(Green, WHITE_DOT),
        Some(Present),
    ),
    rule(
        Matcher::ContainsAll(&["PRESENT", "EARLY"]),
        DisplayStyle::dotted(Green, BLUE_DOT),
        Some(Present),
    ),
    rule(Matcher::ContainsAll(&["PRESENT"]), DisplayStyle::plain(Green), Some(Present)),
    rule(Matcher::ContainsAll(&["ABSENT"]), DisplayStyle::plain(Red), Some(Absent)),
    rule(Matcher::ContainsAll(&["MISS"]), DisplayStyle::plain(Orange), Some(Miss)),
    rule(Matcher::ContainsAll(&["HALF"]), DisplayStyle::plain(Yellow), Some(HalfDay)),
];

const UNRECOGNIZED: DisplayStyle = DisplayStyle::plain(Neutral);

/// Trimmed, uppercased status; a missing status is the empty string.
pub fn normalize(status: Option<&str>) -> String {
    status.unwrap_or_default().trim().to_uppercase()
}

fn resolve(normalized: &str) -> Option<&'static StatusRule> {
    RULES.iter().find(|rule| rule.matcher.matches(normalized))
}

pub fn classify(status: Option<&str>) -> DisplayStyle {
    let normalized = normalize(status);
    match resolve(&normalized) {
        Some(rule) => rule.style,
        None => {
            if !normalized.is_empty() {
                warn!(status = %normalized, "unrecognized attendance status");
            }
            UNRECOGNIZED
        }
    }
}

/// Summary bucket the status is counted in, if any.
pub fn bucket(status: Option<&str>) -> Option<SummaryBucket> {
    resolve(&normalize(status)).and_then(|rule| rule.bucket)
}

/// One or two letter badge shown in the day cell.
pub fn label(status: Option<&str>) -> &'static str {
    let normalized = normalize(status);
    let has = |needle: &str| normalized.contains(needle);

    if has("PRESENT") {
        "P"
    } else if has("ABSENT") || has("DOUBLE") {
        "A"
    } else if has("HALF") {
        "HD"
    } else if has("MISS") {
        "M"
    } else if has("LEAVE") {
        "L"
    } else if has("WEEKLY OFF") || has("WO") {
        "WO"
    } else {
        "-"
    }
}

#[derive(Debug, Serialize)]
pub struct LegendEntry {
    pub statuses: &'static [&'static str],
    pub style: DisplayStyle,
    pub label: &'static str,
    pub bucket: Option<SummaryBucket>,
}

/// The exact-spelling rules, in priority order, for the page legend.
pub fn legend() -> Vec<LegendEntry> {
    RULES
        .iter()
        .filter_map(|rule| match rule.matcher {
            Matcher::Exact(statuses) => Some(LegendEntry {
                statuses,
                style: rule.style,
                label: label(statuses.first().copied()),
                bucket: rule.bucket,
            }),
            Matcher::ContainsAll(_) => None,
        })
        .collect()
}
