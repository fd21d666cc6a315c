//! Frame capture abstraction.
//!
//! This module defines the `FrameSource` trait and provides two raw-socket
//! implementations: a pnet channel bound to one named interface, and an
//! unbound packet socket that sees every interface (Linux only).

mod pnet_capture;
#[cfg(target_os = "linux")]
mod raw_socket;

pub use pnet_capture::PnetCapture;
#[cfg(target_os = "linux")]
pub use raw_socket::RawSocketCapture;

use std::time::Duration;

use crate::error::CaptureError;

/// Receive buffer size; large enough for any frame the decoder handles.
pub const MAX_FRAME_SIZE: usize = 65536;

/// How long a read may block before control returns to the capture loop.
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Label used for the all-interfaces capture.
pub const ALL_INTERFACES: &str = "any";

/// A source of raw link-layer frames.
///
/// Implementations own their capture channel exclusively and release it
/// when dropped. This allows the capture loop to be driven by a mock
/// source in tests.
pub trait FrameSource: Send {
    /// Block until the next frame arrives.
    ///
    /// Returns `Ok(None)` when the read timed out or was interrupted
    /// without data, so the caller can check for cancellation.
    fn next_frame(&mut self) -> Result<Option<&[u8]>, CaptureError>;

    /// Get the name of the interface being captured.
    fn interface_name(&self) -> &str;
}

/// Open a capture channel.
///
/// With `Some(name)` capture is restricted to that interface, otherwise
/// frames from all interfaces are captured.
pub fn open(interface: Option<&str>) -> Result<Box<dyn FrameSource>, CaptureError> {
    match interface {
        Some(name) => Ok(Box::new(PnetCapture::open(name)?)),
        None => open_all_interfaces(),
    }
}

#[cfg(target_os = "linux")]
fn open_all_interfaces() -> Result<Box<dyn FrameSource>, CaptureError> {
    Ok(Box::new(RawSocketCapture::open()?))
}

#[cfg(not(target_os = "linux"))]
fn open_all_interfaces() -> Result<Box<dyn FrameSource>, CaptureError> {
    Err(CaptureError::ChannelCreation(
        "capturing on all interfaces is only supported on Linux; pass an interface name"
            .to_string(),
    ))
}

/// List all available network interfaces.
pub fn list_interfaces() -> Vec<String> {
    PnetCapture::list_interfaces()
}

/// Returns true for read errors that just mean "no frame yet".
pub(crate) fn is_idle_error(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        std::io::ErrorKind::TimedOut
            | std::io::ErrorKind::WouldBlock
            | std::io::ErrorKind::Interrupted
    )
}

/// Returns true for read errors after which the channel will never deliver
/// another frame, such as the interface going away.
pub(crate) fn is_fatal_read_error(err: &CaptureError) -> bool {
    match err {
        CaptureError::Io(e) => is_fatal_os_error(e),
        _ => false,
    }
}

#[cfg(target_os = "linux")]
fn is_fatal_os_error(err: &std::io::Error) -> bool {
    matches!(
        err.raw_os_error(),
        Some(libc::ENETDOWN | libc::ENODEV | libc::ENXIO | libc::EBADF)
    )
}

#[cfg(not(target_os = "linux"))]
fn is_fatal_os_error(_err: &std::io::Error) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_idle_errors() {
        assert!(is_idle_error(&io::Error::from(io::ErrorKind::TimedOut)));
        assert!(is_idle_error(&io::Error::from(io::ErrorKind::WouldBlock)));
        assert!(is_idle_error(&io::Error::from(io::ErrorKind::Interrupted)));
        assert!(!is_idle_error(&io::Error::from(io::ErrorKind::BrokenPipe)));
    }

    #[test]
    fn test_transient_read_errors_are_not_fatal() {
        let err = CaptureError::Io(io::Error::new(io::ErrorKind::Other, "no buffer space"));
        assert!(!is_fatal_read_error(&err));
        assert!(!is_fatal_read_error(&CaptureError::InsufficientPermissions));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_vanished_interface_is_fatal() {
        for code in [libc::ENETDOWN, libc::ENODEV, libc::ENXIO, libc::EBADF] {
            let err = CaptureError::Io(io::Error::from_raw_os_error(code));
            assert!(is_fatal_read_error(&err), "errno {code}");
        }
        let err = CaptureError::Io(io::Error::from_raw_os_error(libc::ENOBUFS));
        assert!(!is_fatal_read_error(&err));
    }

    #[test]
    fn test_unknown_interface_is_interface_error() {
        let result = open(Some("definitely-not-an-interface0"));
        assert!(matches!(
            result,
            Err(CaptureError::InterfaceNotFound(name)) if name == "definitely-not-an-interface0"
        ));
    }
}
