//! FTP control-channel models.

use std::fmt;

/// A client command line such as `USER anonymous`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpCommand {
    /// Command verb, uppercased (e.g. "RETR")
    pub verb: String,
    pub argument: Option<String>,
}

impl fmt::Display for FtpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.argument {
            Some(arg) => write!(f, "{} {}", self.verb, arg),
            None => write!(f, "{}", self.verb),
        }
    }
}

/// A server reply line such as `220 Service ready`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpResponse {
    pub code: u16,
    pub text: String,
    /// True for the first line of a multi-line reply (`220-...`)
    pub multiline: bool,
}

impl fmt::Display for FtpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.multiline { '-' } else { ' ' };
        if self.text.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}{}{}", self.code, sep, self.text)
        }
    }
}

/// Application-layer data extracted from an FTP control segment.
///
/// At least one of `command` or `response` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpMessage {
    pub command: Option<FtpCommand>,
    pub response: Option<FtpResponse>,
    /// The TCP payload the message was read from
    pub payload: Vec<u8>,
}
