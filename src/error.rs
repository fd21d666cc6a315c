//! Error types for frame capture and decoding.

use thiserror::Error;

/// Errors that make capture itself impossible.
///
/// These are fatal to the whole session and are surfaced to the caller
/// before any frame is read.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("insufficient permissions to open a raw capture channel (try running as root)")]
    InsufficientPermissions,

    #[error("network interface not found: {0}")]
    InterfaceNotFound(String),

    #[error("failed to create capture channel: {0}")]
    ChannelCreation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaptureError {
    /// Classify an OS error raised while opening a capture channel.
    pub(crate) fn from_open_error(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            return Self::InsufficientPermissions;
        }

        let msg = err.to_string();
        if msg.contains("permission") || msg.contains("Operation not permitted") {
            return Self::InsufficientPermissions;
        }

        Self::ChannelCreation(msg)
    }
}

/// Errors raised while decoding a single frame.
///
/// Only a frame too short to hold a link-layer header is an error;
/// malformed inner layers truncate the layer chain instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated frame: expected at least {expected} bytes, got {actual}")]
    TruncatedFrame { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_permission_denied_kind_maps_to_insufficient_permissions() {
        let err = io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(matches!(
            CaptureError::from_open_error(err),
            CaptureError::InsufficientPermissions
        ));
    }

    #[test]
    fn test_permission_message_maps_to_insufficient_permissions() {
        let err = io::Error::new(io::ErrorKind::Other, "Operation not permitted (os error 1)");
        assert!(matches!(
            CaptureError::from_open_error(err),
            CaptureError::InsufficientPermissions
        ));
    }

    #[test]
    fn test_other_error_maps_to_channel_creation() {
        let err = io::Error::new(io::ErrorKind::Other, "no such device");
        match CaptureError::from_open_error(err) {
            CaptureError::ChannelCreation(msg) => assert!(msg.contains("no such device")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_truncated_frame_message() {
        let err = DecodeError::TruncatedFrame {
            expected: 14,
            actual: 13,
        };
        assert_eq!(
            err.to_string(),
            "truncated frame: expected at least 14 bytes, got 13"
        );
    }
}
