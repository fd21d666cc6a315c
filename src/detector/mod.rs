//! Application-layer detection module.
//!
//! This module is responsible for recognizing application protocols
//! inside already-decoded transport payloads.

mod ftp_detector;

pub use ftp_detector::{FtpDetector, FTP_CONTROL_PORT};
