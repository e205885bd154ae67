use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ensure_within_limit, NlpResult};

/// Coarse triage label derived from keyword rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Urgent,
    Moderate,
    Routine,
    /// Classification could not be performed
    #[default]
    Unknown,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Urgent => "urgent",
            RiskTier::Moderate => "moderate",
            RiskTier::Routine => "routine",
            RiskTier::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A triage rule: any of the phrases present selects the tier
pub struct RiskRule {
    pub phrases: &'static [&'static str],
    pub tier: RiskTier,
}

/// Rules in priority order, first match wins. Phrases are lowercase.
pub const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        phrases: &["chest pain", "shortness of breath"],
        tier: RiskTier::Urgent,
    },
    RiskRule {
        phrases: &["fever"],
        tier: RiskTier::Moderate,
    },
];

#[derive(Debug, Clone)]
pub struct RiskClassifier {
    max_input_bytes: usize,
}

impl RiskClassifier {
    pub fn new(max_input_bytes: usize) -> Self {
        Self { max_input_bytes }
    }

    pub fn classify(&self, text: &str) -> NlpResult<RiskTier> {
        if text.is_empty() {
            return Ok(RiskTier::Routine);
        }
        ensure_within_limit(text, self.max_input_bytes)?;

        let lowered = text.to_lowercase();
        let tier = RISK_RULES
            .iter()
            .find(|rule| rule.phrases.iter().any(|phrase| lowered.contains(phrase)))
            .map_or(RiskTier::Routine, |rule| rule.tier);
        Ok(tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_INPUT_BYTES;

    fn classify(text: &str) -> RiskTier {
        RiskClassifier::new(DEFAULT_MAX_INPUT_BYTES).classify(text).unwrap()
    }

    #[test]
    fn test_tiers() {
        assert_eq!(classify("I have chest pain"), RiskTier::Urgent);
        assert_eq!(classify("mild fever today"), RiskTier::Moderate);
        assert_eq!(classify("just checking in"), RiskTier::Routine);
        assert_eq!(classify(""), RiskTier::Routine);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("SHORTNESS OF BREATH at night"), RiskTier::Urgent);
        assert_eq!(classify("Fever"), RiskTier::Moderate);
    }

    #[test]
    fn test_urgent_outranks_moderate() {
        assert_eq!(classify("fever and chest pain"), RiskTier::Urgent);
    }

    #[test]
    fn test_oversized_input_rejected() {
        assert!(RiskClassifier::new(3).classify("fever").is_err());
    }

    #[test]
    fn test_display_matches_serde() {
        assert_eq!(RiskTier::Unknown.to_string(), "unknown");
        assert_eq!(serde_json::to_value(RiskTier::Moderate).unwrap(), "moderate");
    }
}
