//! Chorewheel: rotating weekly chore assignments for roomies.
//!
//! Each run fetches the chore definitions and the roomie roster from a
//! Notion workspace, works out which chores are due this week and who is
//! up in the rotation, and creates one due record per chore in the
//! to-dos database.
//!
//! # Architecture
//!
//! - [`notion`] — HTTP client and wire types for the Notion API
//! - [`rotation`] — pure week/rotation arithmetic
//! - [`chore`] — domain model built from Notion records at the boundary
//! - [`plan`] — per-cycle planning and the best-effort creation batch
//! - [`config`] — environment configuration, read once and passed down
//!
//! State lives entirely in the remote workspace; every run recomputes the
//! plan from scratch. Creating records is not idempotent — running twice
//! in one cycle duplicates that cycle's due records.

pub mod chore;
pub mod config;
pub mod error;
pub mod notion;
pub mod plan;
pub mod rotation;

pub use chore::{Assignment, Chore, Roomie};
pub use config::Config;
pub use error::{ChoreError, Result};
pub use notion::{NotionClient, NotionConfig};
pub use plan::{plan_cycle, run, RunReport};
