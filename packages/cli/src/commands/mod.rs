pub mod auth;
pub mod contests;
pub mod prefs;
pub mod problems;
pub mod submissions;
