//! Weapon attack calculator: library entry point.
//!
//! Exposes model, calculator, search (filter/sort), gamedata loading, config and report
//! rendering for use by the CLI and tests.

pub mod calculator;
pub mod config;
pub mod gamedata;
pub mod model;
pub mod report;
pub mod search;
pub mod util;
