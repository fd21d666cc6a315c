//! Ethernet frame decoder.
//!
//! Walks the encapsulation chain Ethernet -> IPv4 -> ICMP/TCP/UDP -> FTP,
//! stopping at the last layer whose header fits in the captured bytes.

use macaddr::MacAddr6;
use pnet::packet::ethernet::EthernetPacket;
use pnet::packet::icmp::IcmpPacket;
use pnet::packet::ipv4::Ipv4Packet;
use pnet::packet::tcp::TcpPacket;
use pnet::packet::udp::UdpPacket;

use crate::detector::FtpDetector;
use crate::domain::{
    EthernetHeader, FrameRecord, IcmpHeader, Ipv4Header, TcpSegment, Transport,
    TransportProtocol, UdpDatagram,
};
use crate::error::DecodeError;

/// Ethernet II header size
pub const ETHERNET_HEADER_LEN: usize = 14;

/// Minimum header sizes per layer
const IPV4_MIN_HEADER_LEN: usize = 20;
const ICMP_HEADER_LEN: usize = 4;
const TCP_MIN_HEADER_LEN: usize = 20;
const UDP_HEADER_LEN: usize = 8;

/// Smallest legal IHL / TCP data offset, in 4-byte words
const MIN_HEADER_WORDS: u8 = 5;

/// Decoder for captured Ethernet frames.
///
/// Decoding is a pure function of the input bytes: the same buffer and
/// sequence number always produce the same record.
pub struct FrameDecoder {
    ftp: FtpDetector,
}

impl FrameDecoder {
    /// Create a new frame decoder.
    pub fn new() -> Self {
        Self {
            ftp: FtpDetector::new(),
        }
    }

    /// Decode a raw frame into a [`FrameRecord`].
    ///
    /// Fails only when the buffer cannot hold an Ethernet header. Malformed
    /// or unsupported inner layers end the layer chain early instead.
    pub fn decode(&self, raw: &[u8], sequence_number: u64) -> Result<FrameRecord, DecodeError> {
        let ethernet = decode_ethernet(raw)?;
        let is_ipv4 = ethernet.is_ipv4();
        let mut record = FrameRecord::new(sequence_number, raw.len(), ethernet);

        if !is_ipv4 {
            return Ok(record);
        }

        let Some((ipv4, transport_data)) = decode_ipv4(&raw[ETHERNET_HEADER_LEN..]) else {
            return Ok(record);
        };
        let protocol = ipv4.transport_protocol();
        record.push_ipv4(ipv4);

        let transport = match protocol {
            TransportProtocol::Icmp => decode_icmp(transport_data).map(Transport::Icmp),
            TransportProtocol::Tcp => decode_tcp(transport_data).map(Transport::Tcp),
            TransportProtocol::Udp => decode_udp(transport_data).map(Transport::Udp),
            TransportProtocol::Unrecognized(number) => {
                tracing::trace!("Frame #{}: unrecognized IP protocol {}", sequence_number, number);
                None
            }
        };
        let Some(transport) = transport else {
            return Ok(record);
        };

        let ftp = match &transport {
            Transport::Tcp(segment) => self.ftp.detect(segment),
            _ => None,
        };
        record.push_transport(transport);

        if let Some(message) = ftp {
            record.push_ftp(message);
        }

        Ok(record)
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_ethernet(raw: &[u8]) -> Result<EthernetHeader, DecodeError> {
    let truncated = DecodeError::TruncatedFrame {
        expected: ETHERNET_HEADER_LEN,
        actual: raw.len(),
    };
    if raw.len() < ETHERNET_HEADER_LEN {
        return Err(truncated);
    }

    let ethernet = EthernetPacket::new(raw).ok_or(truncated)?;

    Ok(EthernetHeader {
        destination: MacAddr6::from(ethernet.get_destination().octets()),
        source: MacAddr6::from(ethernet.get_source().octets()),
        ethertype: ethernet.get_ethertype().0,
    })
}

/// Decode an IPv4 header, returning it with the bytes it carries.
///
/// The carried bytes end at the declared total length when that length is
/// consistent with the buffer, which keeps link-layer padding out of the
/// transport payload.
fn decode_ipv4(data: &[u8]) -> Option<(Ipv4Header, &[u8])> {
    if data.len() < IPV4_MIN_HEADER_LEN {
        return None;
    }
    let ipv4 = Ipv4Packet::new(data)?;

    let ihl = ipv4.get_header_length();
    let header_len = ihl as usize * 4;
    if ihl < MIN_HEADER_WORDS || header_len > data.len() {
        return None;
    }

    let total_length = ipv4.get_total_length();
    let end = match total_length as usize {
        len if len >= header_len && len <= data.len() => len,
        _ => data.len(),
    };

    let header = Ipv4Header {
        header_length: ihl,
        total_length,
        protocol: ipv4.get_next_level_protocol().0,
        source: ipv4.get_source(),
        destination: ipv4.get_destination(),
    };

    Some((header, &data[header_len..end]))
}

fn decode_icmp(data: &[u8]) -> Option<IcmpHeader> {
    if data.len() < ICMP_HEADER_LEN {
        return None;
    }
    let icmp = IcmpPacket::new(data)?;

    Some(IcmpHeader {
        icmp_type: icmp.get_icmp_type().0,
        code: icmp.get_icmp_code().0,
        checksum: icmp.get_checksum(),
    })
}

fn decode_tcp(data: &[u8]) -> Option<TcpSegment> {
    if data.len() < TCP_MIN_HEADER_LEN {
        return None;
    }
    let tcp = TcpPacket::new(data)?;

    let data_offset = tcp.get_data_offset();
    let header_len = data_offset as usize * 4;
    if data_offset < MIN_HEADER_WORDS || header_len > data.len() {
        return None;
    }

    Some(TcpSegment {
        source_port: tcp.get_source(),
        destination_port: tcp.get_destination(),
        sequence_number: tcp.get_sequence(),
        acknowledgment_number: tcp.get_acknowledgement(),
        header_length: data_offset,
        payload: data[header_len..].to_vec(),
    })
}

fn decode_udp(data: &[u8]) -> Option<UdpDatagram> {
    if data.len() < UDP_HEADER_LEN {
        return None;
    }
    let udp = UdpPacket::new(data)?;

    Some(UdpDatagram {
        source_port: udp.get_source(),
        destination_port: udp.get_destination(),
        length: udp.get_length(),
        payload: data[UDP_HEADER_LEN..].to_vec(),
    })
}
