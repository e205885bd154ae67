//! Common error handling utilities for the call intake backend
//!
//! Every crate in the workspace keeps its own `thiserror` enum close to the
//! code that raises it. This crate holds what they share:
//!
//! - **`IntakeError`**: the top-level error returned by binaries and startup code
//! - **Error codes**: stable `error_type` strings used in HTTP error bodies
//!
//! # Example
//!
//! ```rust
//! use error_common::{IntakeError, Result};
//!
//! fn bind_port(port: u16) -> Result<u16> {
//!     if port == 0 {
//!         return Err(IntakeError::ConfigError("port must be non-zero".to_string()));
//!     }
//!     Ok(port)
//! }
//!
//! assert!(bind_port(0).is_err());
//! ```

pub mod codes;
pub mod types;

pub use types::*;
