use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod attendance_list;
pub mod attendance_sheet;
pub mod dates;
pub mod session;
pub mod youth_filter;
pub mod youth_form;

pub use attendance_list::*;
pub use attendance_sheet::*;
pub use dates::*;
pub use session::*;
pub use youth_filter::*;
pub use youth_form::*;

/// Youth ID in format: "youth::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Youth {
    #[serde(rename = "_id")]
    pub id: String,
    /// ID of the staff member who created the record
    #[serde(rename = "userID", default)]
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Birthday as YYYY-MM-DD (RFC 3339 timestamps are tolerated on read)
    pub birthday: String,
    pub address: String,
    pub education_level: String,
}

/// Body of `POST /api/youth`. Every field defaults to blank so that a
/// missing field reaches validation instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateYouthRequest {
    #[serde(rename = "userID", default)]
    pub user_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub birthday: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub education_level: String,
}

impl CreateYouthRequest {
    /// True when any of the five user-supplied fields is blank
    pub fn has_blank_field(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.birthday,
            &self.address,
            &self.education_level,
        ]
        .iter()
        .any(|value| value.trim().is_empty())
    }
}

/// Closed set of attendance markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Saved,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Saved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Saved => "saved",
        }
    }

    /// Capitalized label for buttons and tally headings
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Saved => "Saved",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = AttendanceStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "saved" => Ok(AttendanceStatus::Saved),
            other => Err(AttendanceStatusError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceStatusError(pub String);

impl fmt::Display for AttendanceStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown attendance status: {}", self.0)
    }
}

impl std::error::Error for AttendanceStatusError {}

/// One element of the `POST /api/attendance` body. Any client-supplied
/// `_id` is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendance {
    pub youth_id: String,
    pub status: AttendanceStatus,
    pub date: String,
}

/// Attendance as stored, with the youth reference left as an id.
/// Attendance ID in format: "attendance::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    #[serde(rename = "_id")]
    pub id: String,
    pub youth_id: String,
    pub status: AttendanceStatus,
    pub date: String,
}

/// A youth reference as returned by the store: expanded to the full record
/// when it resolves, left as the bare id when it dangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YouthRef {
    Expanded(Youth),
    Id(String),
}

impl YouthRef {
    pub fn id(&self) -> &str {
        match self {
            YouthRef::Expanded(youth) => &youth.id,
            YouthRef::Id(id) => id,
        }
    }

    pub fn expanded(&self) -> Option<&Youth> {
        match self {
            YouthRef::Expanded(youth) => Some(youth),
            YouthRef::Id(_) => None,
        }
    }
}

/// Attendance as returned by `GET /api/attendance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub youth_id: YouthRef,
    pub status: AttendanceStatus,
    pub date: String,
}

/// Error body used by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    /// Message to show for a failed response: the `message` field when the
    /// body is an error object, otherwise the raw body text
    pub fn message_from_body(body: &str, status: u16) -> String {
        if let Ok(error) = serde_json::from_str::<ErrorResponse>(body) {
            return error.message;
        }
        let body = body.trim();
        if body.is_empty() {
            format!("Request failed with status {}", status)
        } else {
            body.to_string()
        }
    }
}

/// Log line forwarded by the frontend to `POST /api/logs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRequest {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}

/// Lifecycle of a view's data fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl FetchPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchPhase::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchPhase::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Case-insensitive substring match on either name
pub fn name_matches(first_name: &str, last_name: &str, query: &str) -> bool {
    let query = query.to_lowercase();
    first_name.to_lowercase().contains(&query) || last_name.to_lowercase().contains(&query)
}

impl Youth {
    /// Generate a fresh youth ID
    pub fn generate_id() -> String {
        format!("youth::{}", uuid::Uuid::new_v4().simple())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Attendance {
    /// Generate a fresh attendance ID
    pub fn generate_id() -> String {
        format!("attendance::{}", uuid::Uuid::new_v4().simple())
    }
}
