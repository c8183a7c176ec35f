//! # Range Filtering & Aggregation
//!
//! Read-side helpers over stored responses: the inclusive time window used
//! by listing, the newest-first ordering, and the per-group tally.
//!
//! Malformed filter input never fails a query. A bound that does not parse
//! is treated as absent, widening the window instead of erroring.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::primitives::{DATE_FORMAT, TIMESTAMP_FORMAT};
use crate::types::{Group, SurveyResponse};

// =============================================================================
// TIME RANGE
// =============================================================================

/// Which end of the window a bound text belongs to.
///
/// A bare date widens differently per side: a start date means midnight,
/// an end date means 23:59:59 so the bound includes its whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundSide {
    Start,
    End,
}

/// Optional inclusive time window over stored responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    /// Inclusive lower bound, `None` for unbounded.
    pub start: Option<NaiveDateTime>,
    /// Inclusive upper bound, `None` for unbounded.
    pub end: Option<NaiveDateTime>,
}

impl TimeRange {
    /// The unbounded range: every record matches.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Build a range from raw bound text, e.g. HTTP query parameters.
    ///
    /// Each bound accepts the stored timestamp form or a bare date.
    /// Text in any other shape is treated as absent.
    #[must_use]
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: start.and_then(|s| parse_bound(s, BoundSide::Start)),
            end: end.and_then(|s| parse_bound(s, BoundSide::End)),
        }
    }

    /// Whether both bounds are absent.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether a record time falls inside the window, inclusive on both
    /// ends.
    ///
    /// A record with an unparsable timestamp (`None`) has no position on
    /// the time axis: it matches the unbounded range but never a bounded
    /// one.
    #[must_use]
    pub fn contains(&self, t: Option<NaiveDateTime>) -> bool {
        match t {
            Some(t) => self.start.is_none_or(|s| t >= s) && self.end.is_none_or(|e| t <= e),
            None => self.is_unbounded(),
        }
    }
}

/// Parse one bound: the full stored form first, then a bare date.
fn parse_bound(text: &str, side: BoundSide) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(t) = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT) {
        return Some(t);
    }

    let date = NaiveDate::parse_from_str(text, DATE_FORMAT).ok()?;
    match side {
        BoundSide::Start => date.and_hms_opt(0, 0, 0),
        BoundSide::End => date.and_hms_opt(23, 59, 59),
    }
}

// =============================================================================
// ORDERING
// =============================================================================

/// Order records newest first.
///
/// `Option` orders `None` before `Some`, so sorting by the reversed parsed
/// timestamp puts rows with unparsable timestamps last; the stable sort
/// keeps their stored order among themselves.
pub fn sort_newest_first(records: &mut [SurveyResponse]) {
    records.sort_by_key(|r| Reverse(r.submitted_at()));
}

/// Restrict records to the window and order them newest first.
///
/// This is the listing operation: what the HTTP listing endpoint and the
/// CLI list command both return.
#[must_use]
pub fn filter_newest_first(records: Vec<SurveyResponse>, range: &TimeRange) -> Vec<SurveyResponse> {
    let mut kept: Vec<SurveyResponse> = records
        .into_iter()
        .filter(|r| range.contains(r.submitted_at()))
        .collect();
    sort_newest_first(&mut kept);
    kept
}

// =============================================================================
// GROUP TALLY
// =============================================================================

/// Aggregate counts over stored responses.
///
/// Unknown stored labels are counted in `other` rather than dropped, so
/// `total` always equals the sum of the four buckets and no record
/// disappears from the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTally {
    /// Total record count.
    pub total: u64,
    /// Records assigned to the tutorial track.
    pub tutorial: u64,
    /// Records assigned to the standard track.
    pub standard: u64,
    /// Records assigned to the advanced track.
    pub advanced: u64,
    /// Records whose stored label is outside the known set.
    pub other: u64,
}

impl GroupTally {
    /// An empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a collection of records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a SurveyResponse>) -> Self {
        let mut tally = Self::new();
        for record in records {
            tally.add(record);
        }
        tally
    }

    /// Count one record into its bucket.
    /// Uses saturating arithmetic so counters never wrap.
    pub fn add(&mut self, record: &SurveyResponse) {
        self.total = self.total.saturating_add(1);
        match record.group() {
            Some(Group::Tutorial) => self.tutorial = self.tutorial.saturating_add(1),
            Some(Group::Standard) => self.standard = self.standard.saturating_add(1),
            Some(Group::Advanced) => self.advanced = self.advanced.saturating_add(1),
            None => self.other = self.other.saturating_add(1),
        }
    }

    /// Sum of the per-group buckets. Equal to `total` by construction.
    #[must_use]
    pub const fn bucket_sum(&self) -> u64 {
        self.tutorial + self.standard + self.advanced + self.other
    }
}

// =============================================================================
// TESTS
// =============================================================================
