//! FTP control-channel detection logic.

use crate::domain::{FtpCommand, FtpMessage, FtpResponse, TcpSegment};

/// Well-known FTP control port.
pub const FTP_CONTROL_PORT: u16 = 21;

/// Detects FTP commands and replies in TCP segments.
///
/// Kept separate from the frame decoder so the link/network/transport walk
/// never depends on application-layer heuristics.
pub struct FtpDetector {
    port: u16,
}

impl FtpDetector {
    /// Create a detector for the standard control port.
    pub fn new() -> Self {
        Self {
            port: FTP_CONTROL_PORT,
        }
    }

    /// Returns true if either side of the segment uses the control port.
    pub fn is_ftp_segment(&self, segment: &TcpSegment) -> bool {
        segment.source_port == self.port || segment.destination_port == self.port
    }

    /// Analyze a TCP segment and return the FTP message it carries.
    ///
    /// Returns `None` for other ports, empty payloads, and payloads that
    /// are neither a command line nor a reply line.
    pub fn detect(&self, segment: &TcpSegment) -> Option<FtpMessage> {
        if !self.is_ftp_segment(segment) || segment.payload.is_empty() {
            return None;
        }

        let line = first_line(&segment.payload)?;

        let response = parse_response(line);
        let command = if response.is_none() {
            parse_command(line)
        } else {
            None
        };

        if command.is_none() && response.is_none() {
            return None;
        }

        Some(FtpMessage {
            command,
            response,
            payload: segment.payload.clone(),
        })
    }
}

impl Default for FtpDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// First line of an ASCII payload, without its line terminator.
fn first_line(payload: &[u8]) -> Option<&str> {
    let end = payload
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(payload.len());
    let mut line = &payload[..end];
    if let Some(stripped) = line.strip_suffix(b"\r") {
        line = stripped;
    }

    if line.is_empty() || !line.is_ascii() {
        return None;
    }

    std::str::from_utf8(line).ok()
}

/// Parse a reply line: three digits followed by a space, a dash or nothing.
fn parse_response(line: &str) -> Option<FtpResponse> {
    let bytes = line.as_bytes();
    if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
        return None;
    }
    if !(b'1'..=b'5').contains(&bytes[0]) {
        return None;
    }

    let multiline = match bytes.get(3) {
        None | Some(b' ') => false,
        Some(b'-') => true,
        Some(_) => return None,
    };

    let code = line[..3].parse().ok()?;
    let text = line.get(4..).unwrap_or("").trim_end().to_string();
    if text.chars().any(|c| c.is_ascii_control()) {
        return None;
    }

    Some(FtpResponse {
        code,
        text,
        multiline,
    })
}

/// Parse a command line: a 3-4 letter verb and an optional argument.
fn parse_command(line: &str) -> Option<FtpCommand> {
    let (verb, argument) = match line.split_once(' ') {
        Some((verb, rest)) => (verb, Some(rest.trim())),
        None => (line, None),
    };

    if !(3..=4).contains(&verb.len()) || !verb.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let argument = argument.filter(|arg| !arg.is_empty());
    if let Some(arg) = argument {
        if arg.chars().any(|c| c.is_ascii_control()) {
            return None;
        }
    }

    Some(FtpCommand {
        verb: verb.to_ascii_uppercase(),
        argument: argument.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(source_port: u16, destination_port: u16, payload: &[u8]) -> TcpSegment {
        TcpSegment {
            source_port,
            destination_port,
            sequence_number: 1000,
            acknowledgment_number: 2000,
            header_length: 5,
            payload: payload.to_vec(),
        }
    }

    #[test]
    fn test_detect_command_with_argument() {
        let detector = FtpDetector::new();
        let message = detector
            .detect(&segment(51000, 21, b"USER anonymous\r\n"))
            .unwrap();

        let command = message.command.unwrap();
        assert_eq!(command.verb, "USER");
        assert_eq!(command.argument.as_deref(), Some("anonymous"));
        assert!(message.response.is_none());
        assert_eq!(message.payload, b"USER anonymous\r\n");
    }

    #[test]
    fn test_detect_command_without_argument() {
        let detector = FtpDetector::new();
        let message = detector.detect(&segment(51000, 21, b"pasv\r\n")).unwrap();

        let command = message.command.unwrap();
        assert_eq!(command.verb, "PASV");
        assert!(command.argument.is_none());
    }

    #[test]
    fn test_detect_response() {
        let detector = FtpDetector::new();
        let message = detector
            .detect(&segment(21, 51000, b"220 (vsFTPd 3.0.3)\r\n"))
            .unwrap();

        let response = message.response.unwrap();
        assert_eq!(response.code, 220);
        assert_eq!(response.text, "(vsFTPd 3.0.3)");
        assert!(!response.multiline);
        assert!(message.command.is_none());
    }

    #[test]
    fn test_detect_multiline_response() {
        let detector = FtpDetector::new();
        let message = detector
            .detect(&segment(21, 51000, b"230-Welcome\r\n230 Login successful.\r\n"))
            .unwrap();

        let response = message.response.unwrap();
        assert_eq!(response.code, 230);
        assert!(response.multiline);
        assert_eq!(response.text, "Welcome");
    }

    #[test]
    fn test_bare_response_code() {
        assert_eq!(parse_response("200").map(|r| r.code), Some(200));
    }

    #[test]
    fn test_other_ports_ignored() {
        let detector = FtpDetector::new();
        assert!(detector.detect(&segment(51000, 80, b"USER bob\r\n")).is_none());
    }

    #[test]
    fn test_control_port_on_either_side() {
        let detector = FtpDetector::new();
        assert!(detector.is_ftp_segment(&segment(FTP_CONTROL_PORT, 51000, b"")));
        assert!(detector.is_ftp_segment(&segment(51000, FTP_CONTROL_PORT, b"")));
        assert!(!detector.is_ftp_segment(&segment(2121, 51000, b"")));
    }

    #[test]
    fn test_empty_payload_ignored() {
        let detector = FtpDetector::new();
        assert!(detector.detect(&segment(51000, 21, b"")).is_none());
    }

    #[test]
    fn test_binary_payload_ignored() {
        let detector = FtpDetector::new();
        assert!(detector
            .detect(&segment(51000, 21, &[0x16, 0x03, 0x01, 0xff, 0xfe]))
            .is_none());
    }

    #[test]
    fn test_unrecognized_text_ignored() {
        let detector = FtpDetector::new();
        assert!(detector
            .detect(&segment(51000, 21, b"hello there friend\r\n"))
            .is_none());
        assert!(detector.detect(&segment(21, 51000, b"999 nope\r\n")).is_none());
        assert!(detector.detect(&segment(21, 51000, b"22x oops\r\n")).is_none());
    }
}
