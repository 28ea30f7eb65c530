pub mod use_attendance_list;
pub mod use_session;
pub mod use_youth_management;
