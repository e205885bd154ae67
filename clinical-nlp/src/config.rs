// Transcript processing configuration
use serde::{Deserialize, Serialize};

/// Default upper bound on transcript size accepted by each transform (1 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NlpConfig {
    /// Personal names masked as `[NAME]`, matched case-insensitively as whole words
    pub name_denylist: Vec<String>,
    pub max_input_bytes: usize,
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            name_denylist: vec!["Rahul".to_string(), "Anita".to_string(), "Meera".to_string()],
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}
