use js_sys::Date;
use shared::to_iso_date;

/// Current year from the browser clock
pub fn current_year() -> i32 {
    Date::new_0().get_full_year() as i32
}

/// Get current date in YYYY-MM-DD format
pub fn get_current_date() -> String {
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    to_iso_date(year, month, day).unwrap_or_default()
}
