use regex::{Regex, RegexBuilder};

use crate::config::NlpConfig;
use crate::error::{ensure_within_limit, NlpResult};

pub const PHONE_PLACEHOLDER: &str = "[PHONE]";
pub const NAME_PLACEHOLDER: &str = "[NAME]";

/// A standalone run of exactly ten decimal digits. `\b` and `\d` are
/// Unicode-aware, so digits glued to letters or to longer digit runs never match.
const PHONE_PATTERN: &str = r"\b\d{10}\b";

/// PII redactor for call transcripts
#[derive(Debug, Clone)]
pub struct PiiRedactor {
    phones: Regex,
    names: Option<Regex>,
    max_input_bytes: usize,
}

impl PiiRedactor {
    pub fn new(config: &NlpConfig) -> NlpResult<Self> {
        Ok(Self {
            phones: Regex::new(PHONE_PATTERN)?,
            names: build_name_pattern(&config.name_denylist)?,
            max_input_bytes: config.max_input_bytes,
        })
    }

    pub fn redact(&self, text: &str) -> NlpResult<String> {
        if text.is_empty() {
            return Ok(String::new());
        }
        ensure_within_limit(text, self.max_input_bytes)?;

        let result = self.redact_phones(text);
        Ok(self.redact_names(&result))
    }

    fn redact_phones(&self, text: &str) -> String {
        self.phones.replace_all(text, PHONE_PLACEHOLDER).into_owned()
    }

    fn redact_names(&self, text: &str) -> String {
        match &self.names {
            Some(pattern) => pattern.replace_all(text, NAME_PLACEHOLDER).into_owned(),
            None => text.to_string(),
        }
    }
}

fn build_name_pattern(denylist: &[String]) -> NlpResult<Option<Regex>> {
    let alternatives: Vec<String> = denylist
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(regex::escape)
        .collect();

    if alternatives.is_empty() {
        return Ok(None);
    }

    let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternatives.join("|")))
        .case_insensitive(true)
        .build()?;
    Ok(Some(pattern))
}
