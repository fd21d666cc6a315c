//! Domain models for decoded frames.
//!
//! These types describe what was found in a frame, independent of how the
//! bytes were captured or parsed.

mod frame;
mod ftp;
mod headers;

pub use frame::{FrameRecord, Layer};
pub use ftp::{FtpCommand, FtpMessage, FtpResponse};
pub use headers::{
    EthernetHeader, IcmpHeader, Ipv4Header, TcpSegment, Transport,
    TransportProtocol, UdpDatagram, ETHERTYPE_IPV4,
};
