//! Rule-based post-call transcript processing
//!
//! Three independent, pure transforms run over a finished call transcript:
//!
//! - **Redaction**: masks 10-digit phone numbers and a denylist of personal names
//! - **SOAP synthesis**: derives a Subjective/Objective/Assessment/Plan note
//! - **Risk triage**: maps the transcript to `urgent`, `moderate` or `routine`
//!
//! The patterns are illustrative. This is not a certified PHI scrubber and the
//! triage rules are keyword heuristics, not clinical judgment.
//!
//! # Example
//!
//! ```rust
//! use clinical_nlp::{ClinicalNlp, NlpConfig, RiskTier, TranscriptTransforms};
//!
//! let nlp = ClinicalNlp::new(&NlpConfig::default()).unwrap();
//!
//! assert_eq!(nlp.redact("Call 9876543210 now").unwrap(), "Call [PHONE] now");
//! assert_eq!(nlp.classify("I have chest pain").unwrap(), RiskTier::Urgent);
//!
//! let note = nlp.synthesize("Patient feels dizzy. No other symptoms.", Some("Likely vertigo")).unwrap();
//! assert_eq!(note.subjective, "Patient feels dizzy");
//! assert_eq!(note.assessment, "Likely vertigo");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod redactor;
pub mod risk;
pub mod soap;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use redactor::*;
pub use risk::*;
pub use soap::*;
