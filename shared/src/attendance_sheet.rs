//! Take-attendance sheet: one optional mark per youth for a single date,
//! turned into a bulk submission.

use std::collections::HashMap;
use std::fmt;

use crate::{AttendanceStatus, NewAttendance, Youth};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    NothingMarked,
    MissingDate,
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::NothingMarked => f.write_str("Mark at least one youth before submitting."),
            SheetError::MissingDate => f.write_str("Pick a date before submitting."),
        }
    }
}

impl std::error::Error for SheetError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceSheet {
    date: String,
    marks: HashMap<String, AttendanceStatus>,
}

impl AttendanceSheet {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            marks: HashMap::new(),
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    /// Mark a youth; marking with the current status clears the mark
    pub fn toggle(&mut self, youth_id: &str, status: AttendanceStatus) {
        if self.marks.get(youth_id) == Some(&status) {
            self.marks.remove(youth_id);
        } else {
            self.marks.insert(youth_id.to_string(), status);
        }
    }

    pub fn status_of(&self, youth_id: &str) -> Option<AttendanceStatus> {
        self.marks.get(youth_id).copied()
    }

    pub fn marked_count(&self) -> usize {
        self.marks.len()
    }

    pub fn clear_marks(&mut self) {
        self.marks.clear();
    }

    /// Records to submit, in youth-list order. Marks for youths no longer
    /// in the list are dropped.
    pub fn submission(&self, youths: &[Youth]) -> Result<Vec<NewAttendance>, SheetError> {
        if self.date.trim().is_empty() {
            return Err(SheetError::MissingDate);
        }
        let records: Vec<NewAttendance> = youths
            .iter()
            .filter_map(|youth| {
                self.status_of(&youth.id).map(|status| NewAttendance {
                    youth_id: youth.id.clone(),
                    status,
                    date: self.date.clone(),
                })
            })
            .collect();
        if records.is_empty() {
            return Err(SheetError::NothingMarked);
        }
        Ok(records)
    }
}

/// Success line shown after a bulk save
pub fn attendance_saved_message(count: usize) -> String {
    format!("Attendance saved for {} youth.", count)
}
