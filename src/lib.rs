//! Raw frame capture and protocol decoding.
//!
//! Frames flow from a [`capture::FrameSource`] through the
//! [`parser::FrameDecoder`] into [`domain::FrameRecord`]s, which the
//! [`sniffer::CaptureLoop`] numbers, hands to every registered
//! [`reporter::FrameObserver`] and yields to its caller.

pub mod capture;
pub mod config;
pub mod detector;
pub mod domain;
pub mod error;
pub mod parser;
pub mod reporter;
pub mod sniffer;

pub use capture::FrameSource;
pub use config::CaptureConfig;
pub use domain::{FrameRecord, Layer};
pub use error::{CaptureError, DecodeError};
pub use parser::FrameDecoder;
pub use reporter::{ConsoleReporter, FrameObserver, ObserverRegistry};
pub use sniffer::{CancellationToken, CaptureLoop};
