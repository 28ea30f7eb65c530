pub mod add_youth_modal;
pub mod attendance_list;
pub mod dashboard;
pub mod header;
pub mod login_panel;
pub mod route_guard;
pub mod take_attendance;
pub mod youth_management;
