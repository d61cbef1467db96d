//! Storage layer for studybuddy.
//!
//! `SQLite` persistence for the completed-session history.

mod database;
mod migrations;

pub use database::Database;
