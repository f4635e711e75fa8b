use thiserror::Error;

pub type Result<T> = std::result::Result<T, KeyrowError>;

#[derive(Debug, Error)]
pub enum KeyrowError {
    /// A lesson referenced a row that is not in the registry. This is a
    /// curriculum data bug and must not be papered over with a default row.
    #[error("unknown keyboard row: {0}")]
    UnknownRow(String),

    #[error("no lesson at index {0}")]
    UnknownLesson(usize),

    #[error("unsupported code language: {0}")]
    UnsupportedLanguage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        assert_eq!(
            KeyrowError::UnknownRow("focus_q_w".to_string()).to_string(),
            "unknown keyboard row: focus_q_w"
        );
        assert_eq!(KeyrowError::UnknownLesson(40).to_string(), "no lesson at index 40");
        assert_eq!(
            KeyrowError::UnsupportedLanguage("cobol".to_string()).to_string(),
            "unsupported code language: cobol"
        );
    }
}
