//! # Attendance List View Model
//!
//! Framework-free state behind the attendance list: the two independent
//! fetches, the youth join, the name search and the status tally.
//!
//! The join resolves each attendance record against the youth list by
//! exact identity through an index built once per youth fetch. A record
//! whose youth cannot be found renders as "Unknown" / "Unknown".
//!
//! The tally always covers the full attendance set; the search only
//! narrows the rows shown in the table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{format_display_date, name_matches, AttendanceRecord, AttendanceStatus, FetchPhase, Youth};

pub const UNKNOWN_NAME: &str = "Unknown";
pub const NO_ATTENDANCE_RECORDS: &str = "No attendance records found.";
pub const ATTENDANCE_FETCH_FAILED: &str = "Failed to fetch attendance data";
pub const YOUTH_FETCH_FAILED: &str = "Failed to fetch youth data";

/// Identity → youth lookup, rebuilt whenever a new youth list arrives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YouthIndex {
    by_id: HashMap<String, Youth>,
}

impl YouthIndex {
    pub fn new(youths: &[Youth]) -> Self {
        let by_id = youths
            .iter()
            .map(|youth| (youth.id.clone(), youth.clone()))
            .collect();
        Self { by_id }
    }

    pub fn get(&self, youth_id: &str) -> Option<&Youth> {
        self.by_id.get(youth_id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRow {
    pub id: String,
    pub youth_first_name: String,
    pub youth_last_name: String,
    pub status: AttendanceStatus,
    pub date: String,
}

impl AttendanceRow {
    pub fn display_date(&self) -> String {
        format_display_date(&self.date)
    }
}

/// Join attendance records to youth names
pub fn join_attendance(records: &[AttendanceRecord], index: &YouthIndex) -> Vec<AttendanceRow> {
    records
        .iter()
        .map(|record| {
            let youth = index.get(record.youth_id.id());
            AttendanceRow {
                id: record.id.clone(),
                youth_first_name: youth
                    .map(|y| y.first_name.clone())
                    .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
                youth_last_name: youth
                    .map(|y| y.last_name.clone())
                    .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
                status: record.status,
                date: record.date.clone(),
            }
        })
        .collect()
}

/// Rows whose first or last name contains the query, ignoring case
pub fn filter_rows<'a>(rows: &'a [AttendanceRow], query: &str) -> Vec<&'a AttendanceRow> {
    rows.iter()
        .filter(|row| name_matches(&row.youth_first_name, &row.youth_last_name, query))
        .collect()
}

/// Count of records per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTally {
    pub present: usize,
    pub absent: usize,
    pub saved: usize,
}

impl StatusTally {
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = AttendanceStatus>,
    {
        let mut tally = Self::default();
        for status in statuses {
            match status {
                AttendanceStatus::Present => tally.present += 1,
                AttendanceStatus::Absent => tally.absent += 1,
                AttendanceStatus::Saved => tally.saved += 1,
            }
        }
        tally
    }

    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        Self::from_statuses(records.iter().map(|record| record.status))
    }

    pub fn count(&self, status: AttendanceStatus) -> usize {
        match status {
            AttendanceStatus::Present => self.present,
            AttendanceStatus::Absent => self.absent,
            AttendanceStatus::Saved => self.saved,
        }
    }

    pub fn total(&self) -> usize {
        self.present + self.absent + self.saved
    }
}

/// State of the attendance list view.
///
/// `begin_refresh` starts both fetches; each completion is applied as it
/// arrives. The view reports `Loading` until both have completed, while
/// still exposing whatever data it currently holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceListModel {
    records: Vec<AttendanceRecord>,
    index: YouthIndex,
    rows: Vec<AttendanceRow>,
    tally: StatusTally,
    pending: u8,
    fetched: bool,
    error: Option<String>,
    search_query: String,
    refresh_counter: u32,
}

impl AttendanceListModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark both fetches as in flight and clear the previous error
    pub fn begin_refresh(&mut self) {
        self.pending = 2;
        self.error = None;
    }

    /// Bump the manual refresh counter; views re-fetch when it changes
    pub fn request_refresh(&mut self) {
        self.refresh_counter = self.refresh_counter.wrapping_add(1);
    }

    pub fn refresh_counter(&self) -> u32 {
        self.refresh_counter
    }

    pub fn attendance_loaded(&mut self, result: Result<Vec<AttendanceRecord>, String>) {
        match result {
            Ok(records) => {
                self.tally = StatusTally::from_records(&records);
                self.records = records;
                self.rejoin();
            }
            Err(message) => self.error = Some(message),
        }
        self.complete_one();
    }

    pub fn youth_loaded(&mut self, result: Result<Vec<Youth>, String>) {
        match result {
            Ok(youths) => {
                self.index = YouthIndex::new(&youths);
                self.rejoin();
            }
            Err(message) => self.error = Some(message),
        }
        self.complete_one();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn phase(&self) -> FetchPhase {
        if self.pending > 0 {
            FetchPhase::Loading
        } else if let Some(message) = &self.error {
            FetchPhase::Error(message.clone())
        } else if self.fetched {
            FetchPhase::Success
        } else {
            FetchPhase::Idle
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Every joined row, ignoring the search
    pub fn rows(&self) -> &[AttendanceRow] {
        &self.rows
    }

    /// Rows matching the current search
    pub fn visible_rows(&self) -> Vec<&AttendanceRow> {
        filter_rows(&self.rows, &self.search_query)
    }

    pub fn tally(&self) -> StatusTally {
        self.tally
    }

    fn rejoin(&mut self) {
        self.rows = join_attendance(&self.records, &self.index);
    }

    fn complete_one(&mut self) {
        self.pending = self.pending.saturating_sub(1);
        self.fetched = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::youth;
    use crate::YouthRef;

    fn record(id: &str, youth: YouthRef, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: id.to_string(),
            youth_id: youth,
            status,
            date: "2024-03-01".to_string(),
        }
    }

    fn sample_youths() -> Vec<Youth> {
        vec![
            youth("youth::1", "Anna", "Lee", "2020-06-15"),
            youth("youth::2", "John", "Anderson", "2012-01-02"),
            youth("youth::3", "Mary", "Smith", "2010-09-09"),
        ]
    }

    fn sample_records() -> Vec<AttendanceRecord> {
        let youths = sample_youths();
        vec![
            record("attendance::1", YouthRef::Expanded(youths[0].clone()), AttendanceStatus::Present),
            record("attendance::2", YouthRef::Expanded(youths[1].clone()), AttendanceStatus::Present),
            record("attendance::3", YouthRef::Expanded(youths[2].clone()), AttendanceStatus::Absent),
            record("attendance::4", YouthRef::Id("youth::gone".to_string()), AttendanceStatus::Saved),
        ]
    }

    #[test]
    fn test_join_resolves_names_and_marks_unknown() {
        let index = YouthIndex::new(&sample_youths());
        let rows = join_attendance(&sample_records(), &index);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].youth_first_name, "Anna");
        assert_eq!(rows[1].youth_last_name, "Anderson");
        assert_eq!(rows[3].youth_first_name, UNKNOWN_NAME);
        assert_eq!(rows[3].youth_last_name, UNKNOWN_NAME);
        assert_eq!(rows[3].status, AttendanceStatus::Saved);
    }

    #[test]
    fn test_join_uses_youth_list_not_embedded_copy() {
        // The embedded youth exists but the youth list has not arrived yet
        let rows = join_attendance(&sample_records(), &YouthIndex::default());
        assert!(rows.iter().all(|row| row.youth_first_name == UNKNOWN_NAME));
    }

    #[test]
    fn test_filter_rows_matches_first_or_last_name() {
        let index = YouthIndex::new(&sample_youths());
        let rows = join_attendance(&sample_records(), &index);

        let matched: Vec<&str> = filter_rows(&rows, "an")
            .iter()
            .map(|row| row.id.as_str())
            .collect();
        assert_eq!(matched, vec!["attendance::1", "attendance::2"]);

        assert_eq!(filter_rows(&rows, "SMITH").len(), 1);
        assert_eq!(filter_rows(&rows, "").len(), 4);
        assert_eq!(filter_rows(&rows, "unknown").len(), 1);
        assert!(filter_rows(&rows, "zzz").is_empty());
    }

    #[test]
    fn test_tally_counts_each_status() {
        let tally = StatusTally::from_statuses([
            AttendanceStatus::Present,
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Saved,
        ]);
        assert_eq!(tally, StatusTally { present: 2, absent: 1, saved: 1 });
        assert_eq!(tally.count(AttendanceStatus::Present), 2);
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn test_tally_ignores_search_filter() {
        let mut model = AttendanceListModel::new();
        model.begin_refresh();
        model.attendance_loaded(Ok(sample_records()));
        model.youth_loaded(Ok(sample_youths()));

        model.set_search_query("anna");
        assert_eq!(model.visible_rows().len(), 1);
        assert_eq!(model.tally(), StatusTally { present: 2, absent: 1, saved: 1 });
        assert_eq!(model.rows().len(), 4);
    }

    #[test]
    fn test_phase_stays_loading_until_both_fetches_complete() {
        let mut model = AttendanceListModel::new();
        assert_eq!(model.phase(), FetchPhase::Idle);

        model.begin_refresh();
        assert_eq!(model.phase(), FetchPhase::Loading);

        model.youth_loaded(Ok(sample_youths()));
        assert_eq!(model.phase(), FetchPhase::Loading);
        assert!(model.rows().is_empty());

        model.attendance_loaded(Ok(sample_records()));
        assert_eq!(model.phase(), FetchPhase::Success);
        assert_eq!(model.rows()[0].youth_first_name, "Anna");
    }

    #[test]
    fn test_attendance_first_then_youth_rejoins() {
        let mut model = AttendanceListModel::new();
        model.begin_refresh();
        model.attendance_loaded(Ok(sample_records()));

        // Transient state: rows exist but names are not resolved yet
        assert_eq!(model.rows()[0].youth_first_name, UNKNOWN_NAME);

        model.youth_loaded(Ok(sample_youths()));
        assert_eq!(model.rows()[0].youth_first_name, "Anna");
    }

    #[test]
    fn test_error_is_last_writer_wins() {
        let mut model = AttendanceListModel::new();
        model.begin_refresh();
        model.attendance_loaded(Err(ATTENDANCE_FETCH_FAILED.to_string()));
        model.youth_loaded(Err(YOUTH_FETCH_FAILED.to_string()));

        assert_eq!(model.phase(), FetchPhase::Error(YOUTH_FETCH_FAILED.to_string()));
        assert!(model.visible_rows().is_empty());
    }

    #[test]
    fn test_refresh_clears_error_and_keeps_previous_data() {
        let mut model = AttendanceListModel::new();
        model.begin_refresh();
        model.attendance_loaded(Ok(sample_records()));
        model.youth_loaded(Err(YOUTH_FETCH_FAILED.to_string()));
        assert_eq!(model.error(), Some(YOUTH_FETCH_FAILED));

        model.request_refresh();
        assert_eq!(model.refresh_counter(), 1);
        model.begin_refresh();
        assert_eq!(model.error(), None);
        assert_eq!(model.rows().len(), 4);
    }

    #[test]
    fn test_display_date() {
        let rows = join_attendance(&sample_records(), &YouthIndex::default());
        assert_eq!(rows[0].display_date(), "March 1, 2024");
    }
}
