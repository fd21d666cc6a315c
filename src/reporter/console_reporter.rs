//! Console-based frame reporter.

use std::io::{self, Write};

use anyhow::Context;

use crate::domain::{FrameRecord, Layer, TransportProtocol};
use crate::reporter::FrameObserver;

/// Payload bytes shown before output is cut off with "...".
const DATA_PREVIEW_LEN: usize = 50;

/// Reports decoded frames to the console.
///
/// Formats each frame as one block per decoded layer, in a
/// human-readable format suitable for terminal output.
pub struct ConsoleReporter {
    /// Whether to print transport/application payload bytes
    display_data: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter.
    pub fn new() -> Self {
        Self {
            display_data: false,
        }
    }

    /// Enable or disable payload output.
    pub fn with_display_data(mut self, display_data: bool) -> Self {
        self.display_data = display_data;
        self
    }

    fn format_frame(&self, record: &FrameRecord, time: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "[>] Frame #{} at {}\n",
            record.sequence_number(),
            time
        ));
        output.push_str(&format!(
            "    [+] Frame Length: {} bytes\n",
            record.total_length()
        ));

        for layer in record.layer_chain() {
            self.format_layer(&mut output, record, *layer);
        }

        // Transport payload, once, after the transport block
        if self.display_data && !record.has_layer(Layer::Ftp) {
            if let Some(transport) = record.transport() {
                if transport.layer() != Layer::Icmp {
                    output.push_str(&format!(
                        "        - Data: {}\n",
                        preview(transport.payload())
                    ));
                }
            }
        }

        if let Some(ipv4) = record.ipv4() {
            if let TransportProtocol::Unrecognized(number) = ipv4.transport_protocol() {
                output.push_str(&format!("    [+] Protocol {}: Unknown Protocol\n", number));
            }
        }

        output
    }

    fn format_layer(&self, output: &mut String, record: &FrameRecord, layer: Layer) {
        match layer {
            Layer::Ethernet => {
                let ethernet = record.ethernet();
                output.push_str("    [+] Ethernet Frame:\n");
                output.push_str(&format!(
                    "        - Source MAC Address: {}\n",
                    ethernet.source
                ));
                output.push_str(&format!(
                    "        - Destination MAC Address: {}\n",
                    ethernet.destination
                ));
            }
            Layer::Ipv4 => {
                if let Some(ipv4) = record.ipv4() {
                    output.push_str("    [+] IPv4 Packet:\n");
                    output.push_str(&format!("        - Source IP Address: {}\n", ipv4.source));
                    output.push_str(&format!(
                        "        - Destination IP Address: {}\n",
                        ipv4.destination
                    ));
                    output.push_str(&format!(
                        "        - Header Length: {} bytes\n",
                        ipv4.header_len_bytes()
                    ));
                    output.push_str(&format!(
                        "        - Packet Length: {} bytes\n",
                        ipv4.total_length
                    ));
                }
            }
            Layer::Icmp => {
                if let Some(icmp) = record.icmp() {
                    output.push_str("    [+] ICMP Packet:\n");
                    output.push_str(&format!("        - Type: {}\n", icmp.icmp_type));
                    output.push_str(&format!("        - Code: {}\n", icmp.code));
                    output.push_str(&format!("        - Checksum: {:#06x}\n", icmp.checksum));
                }
            }
            Layer::Tcp => {
                if let Some(tcp) = record.tcp() {
                    output.push_str("    [+] TCP Packet:\n");
                    output.push_str(&format!("        - Source Port: {}\n", tcp.source_port));
                    output.push_str(&format!(
                        "        - Destination Port: {}\n",
                        tcp.destination_port
                    ));
                    output.push_str(&format!(
                        "        - Sequence Number: {}\n",
                        tcp.sequence_number
                    ));
                    output.push_str(&format!(
                        "        - Acknowledgment Number: {}\n",
                        tcp.acknowledgment_number
                    ));
                    output.push_str(&format!(
                        "        - Header Length: {} bytes\n",
                        tcp.header_len_bytes()
                    ));
                }
            }
            Layer::Udp => {
                if let Some(udp) = record.udp() {
                    output.push_str("    [+] UDP Packet:\n");
                    output.push_str(&format!("        - Source Port: {}\n", udp.source_port));
                    output.push_str(&format!(
                        "        - Destination Port: {}\n",
                        udp.destination_port
                    ));
                    output.push_str(&format!("        - Length: {} bytes\n", udp.length));
                }
            }
            Layer::Ftp => {
                if let Some(ftp) = record.ftp() {
                    let command = ftp
                        .command
                        .as_ref()
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "N/A".to_string());
                    let response = ftp
                        .response
                        .as_ref()
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "N/A".to_string());

                    output.push_str("    [+] FTP Packet:\n");
                    output.push_str(&format!("        - Command: {}\n", command));
                    output.push_str(&format!("        - Response: {}\n", response));
                    if self.display_data {
                        output.push_str(&format!(
                            "        - Content: {}\n",
                            preview(&ftp.payload)
                        ));
                    }
                }
            }
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameObserver for ConsoleReporter {
    fn update(&mut self, record: &FrameRecord) -> anyhow::Result<()> {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        let output = self.format_frame(record, &time);

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", output).context("failed to write frame to stdout")?;
        Ok(())
    }

    fn on_start(&mut self, interface: &str) {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(
            stdout,
            "\n[>>>] Packet Sniffer initialized on {}. \
             Waiting for incoming data. Press Ctrl-C to abort..\n",
            interface
        );
    }

    fn on_stop(&mut self) {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "[!] Aborting packet capture...");
    }
}

/// Escaped ASCII rendering of payload bytes, cut off after a short preview.
fn preview(data: &[u8]) -> String {
    let shown = &data[..data.len().min(DATA_PREVIEW_LEN)];
    let mut text: String = shown
        .iter()
        .flat_map(|&b| std::ascii::escape_default(b))
        .map(char::from)
        .collect();

    if data.len() > DATA_PREVIEW_LEN {
        text.push_str("...");
    }
    text
}
