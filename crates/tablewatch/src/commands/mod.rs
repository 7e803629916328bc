//! Command handlers for the tablewatch CLI.

pub mod check;
pub mod config_cmd;
pub mod venues;
