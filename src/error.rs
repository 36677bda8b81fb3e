//! Centralized error types and handling

use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Address conversion error: {0}")]
    Addr(#[from] AddrError),

    #[error("Route table error: {0}")]
    Route(#[from] RouteError),

    #[error("Interface resolution error: {0}")]
    Interface(#[from] InterfaceError),

    #[error("The routing table can only be managed on Windows")]
    UnsupportedPlatform,
}

/// Address codec errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddrError {
    #[error("Invalid IPv4 address: {0}")]
    InvalidAddress(String),
}

/// Route table access errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Native call failed: {}", status_message(*.0))]
    NativeCallFailed(u32),

    #[error("No satisfying buffer size found after {attempts} attempts (last required: {required} bytes)")]
    BufferNegotiationExhausted { attempts: usize, required: u32 },

    #[error("Forwarding table reports {count} records but only {len} bytes were returned")]
    MalformedTable { count: u32, len: usize },

    #[error("Route table used after close")]
    UseAfterClose,
}

/// Interface resolution errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("No viable interface detected")]
    NoViableInterface,

    #[error("Multiple viable interfaces detected, please specify a gateway address")]
    AmbiguousInterface,
}

/// Human-readable meaning of an IP Helper status code.
///
/// Codes outside the table are reported verbatim with no further
/// interpretation.
pub fn status_message(code: u32) -> String {
    match code {
        0 => "success".to_string(),
        2 => "target not found".to_string(),
        5 => "access denied".to_string(),
        50 => "operation not supported".to_string(),
        87 => "invalid parameter".to_string(),
        122 => "insufficient buffer".to_string(),
        1168 => "element not found".to_string(),
        other => format!("error code {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_known_codes() {
        assert_eq!(status_message(0), "success");
        assert_eq!(status_message(2), "target not found");
        assert_eq!(status_message(5), "access denied");
        assert_eq!(status_message(50), "operation not supported");
        assert_eq!(status_message(87), "invalid parameter");
        assert_eq!(status_message(122), "insufficient buffer");
        assert_eq!(status_message(1168), "element not found");
    }

    #[test]
    fn test_status_message_unknown_code() {
        assert_eq!(status_message(31337), "error code 31337");
    }

    #[test]
    fn test_native_call_failed_display() {
        let err = RouteError::NativeCallFailed(87);
        assert_eq!(err.to_string(), "Native call failed: invalid parameter");

        let err = RouteError::NativeCallFailed(9999);
        assert_eq!(err.to_string(), "Native call failed: error code 9999");
    }

    #[test]
    fn test_error_display_messages() {
        assert_eq!(
            InterfaceError::NoViableInterface.to_string(),
            "No viable interface detected"
        );
        assert_eq!(
            InterfaceError::AmbiguousInterface.to_string(),
            "Multiple viable interfaces detected, please specify a gateway address"
        );
        assert_eq!(
            AddrError::InvalidAddress("bogus".to_string()).to_string(),
            "Invalid IPv4 address: bogus"
        );
        assert_eq!(
            RouteError::UseAfterClose.to_string(),
            "Route table used after close"
        );
    }
}
