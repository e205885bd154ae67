//! Persistence for the call intake backend
//!
//! - **Call records**: one record per voice session, insert-or-merge by session id
//! - **Patient directory**: read-only caller lookup by phone or medical id
//! - **Bot registry**: local CRUD over voice bot definitions
//!
//! File-backed collections are JSON arrays. Writes go to a sibling temp file
//! that is renamed over the target, and every read-modify-write sequence runs
//! under a per-store lock. A missing or unparseable file reads as empty.

pub mod bots;
pub mod calls;
pub mod error;
mod json_file;
pub mod patients;
pub mod records;

pub use bots::*;
pub use calls::*;
pub use error::*;
pub use patients::*;
pub use records::*;

/// File names inside the configured data directory
pub const CALLS_FILE: &str = "calls.json";
pub const BOTS_FILE: &str = "bots.json";
pub const PATIENTS_FILE: &str = "patients.json";
