//! # Storage Module
//!
//! SQLite-backed record store for youth and attendance, reached by the
//! domain layer only through the traits in [`traits`].

pub mod db;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use db::DbConnection;
pub use traits::{AttendanceStorage, YouthStorage};
