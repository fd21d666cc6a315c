//! Builders for synthetic frames used across the test suite.

/// Builder for Ethernet frames.
#[derive(Debug, Clone)]
pub struct EthernetBuilder {
    dst_mac: [u8; 6],
    src_mac: [u8; 6],
    ethertype: u16,
    payload: Vec<u8>,
}

impl Default for EthernetBuilder {
    fn default() -> Self {
        Self {
            dst_mac: [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff],
            src_mac: [0x11, 0x22, 0x33, 0x44, 0x55, 0x66],
            ethertype: 0x0800,
            payload: Vec::new(),
        }
    }
}

impl EthernetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ethertype(mut self, ethertype: u16) -> Self {
        self.ethertype = ethertype;
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(14 + self.payload.len());
        frame.extend_from_slice(&self.dst_mac);
        frame.extend_from_slice(&self.src_mac);
        frame.extend_from_slice(&self.ethertype.to_be_bytes());
        frame.extend_from_slice(&self.payload);
        frame
    }
}

/// Builder for IPv4 packets. Options are zero-filled when IHL > 5.
#[derive(Debug, Clone)]
pub struct Ipv4Builder {
    ihl: u8,
    total_length: Option<u16>,
    protocol: u8,
    src: [u8; 4],
    dst: [u8; 4],
    payload: Vec<u8>,
}

impl Default for Ipv4Builder {
    fn default() -> Self {
        Self {
            ihl: 5,
            total_length: None,
            protocol: 6,
            src: [10, 0, 0, 1],
            dst: [10, 0, 0, 2],
            payload: Vec::new(),
        }
    }
}

impl Ipv4Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ihl(mut self, ihl: u8) -> Self {
        self.ihl = ihl;
        self
    }

    /// Override the declared total length (defaults to the real length).
    pub fn total_length(mut self, total_length: u16) -> Self {
        self.total_length = Some(total_length);
        self
    }

    pub fn protocol(mut self, protocol: u8) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn src(mut self, src: [u8; 4]) -> Self {
        self.src = src;
        self
    }

    pub fn dst(mut self, dst: [u8; 4]) -> Self {
        self.dst = dst;
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let header_len = (self.ihl.max(5) as usize) * 4;
        let total_length = self
            .total_length
            .unwrap_or((header_len + self.payload.len()) as u16);

        let mut packet = vec![0u8; header_len];
        packet[0] = 0x40 | (self.ihl & 0x0f);
        packet[2..4].copy_from_slice(&total_length.to_be_bytes());
        packet[8] = 64;
        packet[9] = self.protocol;
        packet[12..16].copy_from_slice(&self.src);
        packet[16..20].copy_from_slice(&self.dst);
        packet.extend_from_slice(&self.payload);
        packet
    }
}

/// Build a TCP segment with the given data offset (in words).
pub fn tcp_segment(
    source_port: u16,
    destination_port: u16,
    sequence_number: u32,
    acknowledgment_number: u32,
    data_offset: u8,
    payload: &[u8],
) -> Vec<u8> {
    let header_len = (data_offset.max(5) as usize) * 4;
    let mut segment = vec![0u8; header_len];
    segment[0..2].copy_from_slice(&source_port.to_be_bytes());
    segment[2..4].copy_from_slice(&destination_port.to_be_bytes());
    segment[4..8].copy_from_slice(&sequence_number.to_be_bytes());
    segment[8..12].copy_from_slice(&acknowledgment_number.to_be_bytes());
    segment[12] = data_offset << 4;
    segment[13] = 0x18; // PSH, ACK
    segment[14..16].copy_from_slice(&64240u16.to_be_bytes());
    segment.extend_from_slice(payload);
    segment
}

pub fn udp_datagram(
    source_port: u16,
    destination_port: u16,
    length: u16,
    payload: &[u8],
) -> Vec<u8> {
    let mut datagram = Vec::with_capacity(8 + payload.len());
    datagram.extend_from_slice(&source_port.to_be_bytes());
    datagram.extend_from_slice(&destination_port.to_be_bytes());
    datagram.extend_from_slice(&length.to_be_bytes());
    datagram.extend_from_slice(&[0, 0]);
    datagram.extend_from_slice(payload);
    datagram
}

pub fn icmp_message(icmp_type: u8, code: u8, checksum: u16) -> Vec<u8> {
    let mut message = vec![icmp_type, code];
    message.extend_from_slice(&checksum.to_be_bytes());
    message.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    message
}

/// A complete Ethernet/IPv4/TCP frame.
pub fn tcp_frame(source_port: u16, destination_port: u16, payload: &[u8]) -> Vec<u8> {
    let segment = tcp_segment(source_port, destination_port, 1, 0, 5, payload);
    let packet = Ipv4Builder::new().protocol(6).payload(segment).build();
    EthernetBuilder::new().payload(packet).build()
}

/// A complete Ethernet/IPv4/UDP frame.
pub fn udp_frame(source_port: u16, destination_port: u16, payload: &[u8]) -> Vec<u8> {
    let length = (8 + payload.len()) as u16;
    let datagram = udp_datagram(source_port, destination_port, length, payload);
    let packet = Ipv4Builder::new().protocol(17).payload(datagram).build();
    EthernetBuilder::new().payload(packet).build()
}
