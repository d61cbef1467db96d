//! studybuddy - A Pomodoro-style study timer for the terminal
//!
//! This crate provides the focus timer engine, session history, reports and
//! the command-line and terminal interfaces built on them.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod focus;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::StudyBuddyError;
pub use focus::{FocusEngine, TimerDriver};
