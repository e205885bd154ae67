use thiserror::Error;

#[derive(Error, Debug)]
pub enum NlpError {
    #[error("Input of {len} bytes exceeds the {limit} byte limit")]
    InputTooLarge { len: usize, limit: usize },

    #[error("Invalid redaction pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

pub type NlpResult<T> = Result<T, NlpError>;

/// Reject inputs larger than the configured byte limit
pub(crate) fn ensure_within_limit(text: &str, limit: usize) -> NlpResult<()> {
    if text.len() > limit {
        return Err(NlpError::InputTooLarge {
            len: text.len(),
            limit,
        });
    }
    Ok(())
}
