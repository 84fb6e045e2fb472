use thiserror::Error;

/// Reason a media file was left untouched
///
/// Every variant is local to a single file; none of them stops the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("No sidecar")]
    NoSidecar,

    #[error("Invalid JSON")]
    InvalidJson(String),

    #[error("Invalid date format")]
    InvalidDateFormat(String),

    #[error("Tool failure")]
    ToolFailure(String),
}

impl SkipReason {
    /// Underlying detail, if any (parser message, tool stderr, ...)
    pub fn detail(&self) -> Option<&str> {
        match self {
            SkipReason::NoSidecar => None,
            SkipReason::InvalidJson(d)
            | SkipReason::InvalidDateFormat(d)
            | SkipReason::ToolFailure(d) => Some(d.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_detail_free() {
        let reason = SkipReason::InvalidJson("expected value at line 1".to_string());
        assert_eq!(reason.to_string(), "Invalid JSON");
        assert_eq!(reason.detail(), Some("expected value at line 1"));
        assert_eq!(SkipReason::NoSidecar.detail(), None);
    }
}
