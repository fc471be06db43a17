mod common;

mod access;
mod auth;
mod contests;
mod feed;
mod leaderboard;
mod preferences;
mod settings;
mod workspace;
