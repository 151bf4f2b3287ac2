//! Table error types

use thiserror::Error;

/// A standard level name that does not match any known level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown level: {0}")]
pub struct ParseLevelError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseLevelError("xhtml".to_string());
        assert_eq!(format!("{}", err), "Unknown level: xhtml");
    }
}
