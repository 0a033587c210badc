//! Career Quiz — Likert-scale career assessment client.

pub mod api;
pub mod assessment;
pub mod cli;
pub mod config;
pub mod error;
pub mod handoff;
pub mod report;
pub mod terminal;
pub mod wizard;
