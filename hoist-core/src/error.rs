//! Error types shared across the Hoist core library.

use std::{error::Error, fmt, io};

/// Errors raised while loading reports or rendering badges.
#[derive(Debug)]
pub enum HoistError {
    /// An underlying I/O failure.
    Io(io::Error),
    /// A report file that is not valid JSON.
    Json(serde_json::Error),
    /// Any other failure, described by a message.
    Other(String),
}

impl fmt::Display for HoistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoistError::Io(err) => write!(f, "io error: {err}"),
            HoistError::Json(err) => write!(f, "json error: {err}"),
            HoistError::Other(message) => write!(f, "{message}"),
        }
    }
}

impl Error for HoistError {}

impl From<io::Error> for HoistError {
    fn from(err: io::Error) -> Self {
        HoistError::Io(err)
    }
}

impl From<serde_json::Error> for HoistError {
    fn from(err: serde_json::Error) -> Self {
        HoistError::Json(err)
    }
}

/// Result alias used throughout the core library.
pub type Result<T> = std::result::Result<T, HoistError>;

#[cfg(test)]
mod tests {
    use super::HoistError;
    use std::io;

    #[test]
    fn io_error_display_includes_source() {
        let err = HoistError::Io(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert_eq!(format!("{err}"), "io error: missing");
    }

    #[test]
    fn json_error_display_includes_source() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = HoistError::Json(parse_err);
        assert!(format!("{err}").starts_with("json error: "));
    }

    #[test]
    fn other_error_display_is_message() {
        let err = HoistError::Other(String::from("badge render failed"));
        assert_eq!(format!("{err}"), "badge render failed");
    }

    #[test]
    fn io_error_converts_into_hoist_error() {
        let err: HoistError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, HoistError::Io(_)));
    }

    #[test]
    fn json_error_converts_into_hoist_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: HoistError = parse_err.into();
        assert!(matches!(err, HoistError::Json(_)));
    }
}
