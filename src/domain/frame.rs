//! The decoded frame record.

use std::fmt;

use super::ftp::FtpMessage;
use super::headers::{
    EthernetHeader, IcmpHeader, Ipv4Header, TcpSegment, Transport, UdpDatagram,
};

/// Identifier of a protocol layer found in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Ethernet,
    Ipv4,
    Icmp,
    Tcp,
    Udp,
    Ftp,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ethernet => write!(f, "Ethernet"),
            Self::Ipv4 => write!(f, "IPv4"),
            Self::Icmp => write!(f, "ICMP"),
            Self::Tcp => write!(f, "TCP"),
            Self::Udp => write!(f, "UDP"),
            Self::Ftp => write!(f, "FTP"),
        }
    }
}

/// One captured frame, decoded.
///
/// A record is immutable once the decoder hands it out. Each per-layer
/// field group is populated exactly when the matching [`Layer`] appears in
/// [`layer_chain`](Self::layer_chain), and the chain is always in
/// encapsulation order, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    sequence_number: u64,
    total_length: usize,
    layer_chain: Vec<Layer>,
    ethernet: EthernetHeader,
    ipv4: Option<Ipv4Header>,
    transport: Option<Transport>,
    ftp: Option<FtpMessage>,
}

impl FrameRecord {
    /// Start a record from its link-layer header.
    pub(crate) fn new(sequence_number: u64, total_length: usize, ethernet: EthernetHeader) -> Self {
        Self {
            sequence_number,
            total_length,
            layer_chain: vec![Layer::Ethernet],
            ethernet,
            ipv4: None,
            transport: None,
            ftp: None,
        }
    }

    pub(crate) fn push_ipv4(&mut self, header: Ipv4Header) {
        debug_assert_eq!(self.last_layer(), Layer::Ethernet);
        self.layer_chain.push(Layer::Ipv4);
        self.ipv4 = Some(header);
    }

    pub(crate) fn push_transport(&mut self, transport: Transport) {
        debug_assert_eq!(self.last_layer(), Layer::Ipv4);
        self.layer_chain.push(transport.layer());
        self.transport = Some(transport);
    }

    pub(crate) fn push_ftp(&mut self, message: FtpMessage) {
        debug_assert_eq!(self.last_layer(), Layer::Tcp);
        self.layer_chain.push(Layer::Ftp);
        self.ftp = Some(message);
    }

    /// Position of this frame in the capture session, starting at 1.
    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    /// Byte length of the raw frame as captured.
    pub fn total_length(&self) -> usize {
        self.total_length
    }

    pub fn layer_chain(&self) -> &[Layer] {
        &self.layer_chain
    }

    pub fn has_layer(&self, layer: Layer) -> bool {
        self.layer_chain.contains(&layer)
    }

    /// The innermost layer that was decoded.
    pub fn last_layer(&self) -> Layer {
        self.layer_chain
            .last()
            .copied()
            .unwrap_or(Layer::Ethernet)
    }

    pub fn ethernet(&self) -> &EthernetHeader {
        &self.ethernet
    }

    pub fn ipv4(&self) -> Option<&Ipv4Header> {
        self.ipv4.as_ref()
    }

    pub fn transport(&self) -> Option<&Transport> {
        self.transport.as_ref()
    }

    pub fn icmp(&self) -> Option<&IcmpHeader> {
        match &self.transport {
            Some(Transport::Icmp(icmp)) => Some(icmp),
            _ => None,
        }
    }

    pub fn tcp(&self) -> Option<&TcpSegment> {
        match &self.transport {
            Some(Transport::Tcp(tcp)) => Some(tcp),
            _ => None,
        }
    }

    pub fn udp(&self) -> Option<&UdpDatagram> {
        match &self.transport {
            Some(Transport::Udp(udp)) => Some(udp),
            _ => None,
        }
    }

    pub fn ftp(&self) -> Option<&FtpMessage> {
        self.ftp.as_ref()
    }
}
