//! Per-layer header models.
//!
//! These types hold the decoded fields of each supported layer. Addresses
//! are kept as raw byte groups and only formatted at the display boundary.

use std::fmt;
use std::net::Ipv4Addr;

use macaddr::MacAddr6;

use super::Layer;

/// EtherType for IPv4.
pub const ETHERTYPE_IPV4: u16 = 0x0800;

/// Ethernet II header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetHeader {
    /// Destination hardware address
    pub destination: MacAddr6,
    /// Source hardware address
    pub source: MacAddr6,
    /// EtherType of the carried network-layer protocol
    pub ethertype: u16,
}

impl EthernetHeader {
    /// Returns true if the frame carries an IPv4 packet.
    pub fn is_ipv4(&self) -> bool {
        self.ethertype == ETHERTYPE_IPV4
    }
}

/// IP protocol numbers the decoder knows how to walk into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportProtocol {
    Icmp,
    Tcp,
    Udp,
    Unrecognized(u8),
}

impl TransportProtocol {
    /// Classify an IPv4 protocol number.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Icmp,
            6 => Self::Tcp,
            17 => Self::Udp,
            other => Self::Unrecognized(other),
        }
    }
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Icmp => write!(f, "ICMP"),
            Self::Tcp => write!(f, "TCP"),
            Self::Udp => write!(f, "UDP"),
            Self::Unrecognized(n) => write!(f, "Unknown({n})"),
        }
    }
}

/// IPv4 header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Header {
    /// Header length in 4-byte words (IHL)
    pub header_length: u8,
    /// Declared total length of the packet
    pub total_length: u16,
    /// Protocol number of the carried transport layer
    pub protocol: u8,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
}

impl Ipv4Header {
    /// Header length in bytes.
    pub fn header_len_bytes(&self) -> usize {
        self.header_length as usize * 4
    }

    pub fn transport_protocol(&self) -> TransportProtocol {
        TransportProtocol::from_u8(self.protocol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcmpHeader {
    pub icmp_type: u8,
    pub code: u8,
    pub checksum: u16,
}

/// TCP header fields plus the bytes that follow the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpSegment {
    pub source_port: u16,
    pub destination_port: u16,
    pub sequence_number: u32,
    pub acknowledgment_number: u32,
    /// Data offset in 4-byte words
    pub header_length: u8,
    pub payload: Vec<u8>,
}

impl TcpSegment {
    /// Header length in bytes.
    pub fn header_len_bytes(&self) -> usize {
        self.header_length as usize * 4
    }
}

/// UDP header fields plus the bytes that follow the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpDatagram {
    pub source_port: u16,
    pub destination_port: u16,
    /// Declared datagram length (header included)
    pub length: u16,
    pub payload: Vec<u8>,
}

/// The decoded transport layer. Exactly one variant per supported protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Icmp(IcmpHeader),
    Tcp(TcpSegment),
    Udp(UdpDatagram),
}

impl Transport {
    /// The layer identifier this transport appends to the layer chain.
    pub fn layer(&self) -> Layer {
        match self {
            Self::Icmp(_) => Layer::Icmp,
            Self::Tcp(_) => Layer::Tcp,
            Self::Udp(_) => Layer::Udp,
        }
    }

    /// Payload carried after the transport header.
    pub fn payload(&self) -> &[u8] {
        match self {
            Self::Icmp(_) => &[],
            Self::Tcp(tcp) => &tcp.payload,
            Self::Udp(udp) => &udp.payload,
        }
    }
}
