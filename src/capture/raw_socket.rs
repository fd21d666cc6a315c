//! Unbound AF_PACKET capture covering every interface.

use std::io::Read;

use socket2::{Domain, Protocol, Socket, Type};

use super::{is_idle_error, FrameSource, ALL_INTERFACES, MAX_FRAME_SIZE, READ_TIMEOUT};
use crate::error::CaptureError;

/// Raw packet socket receiving frames of every protocol on every interface.
pub struct RawSocketCapture {
    socket: Socket,
    buffer: Vec<u8>,
}

impl RawSocketCapture {
    /// Open the socket. Requires CAP_NET_RAW.
    pub fn open() -> Result<Self, CaptureError> {
        // ETH_P_ALL in network byte order
        let protocol = Protocol::from((libc::ETH_P_ALL as u16).to_be() as i32);

        let socket = Socket::new(Domain::PACKET, Type::RAW, Some(protocol))
            .map_err(CaptureError::from_open_error)?;
        socket.set_read_timeout(Some(READ_TIMEOUT))?;

        tracing::info!("Opened capture channel on all interfaces");
        Ok(Self {
            socket,
            buffer: vec![0u8; MAX_FRAME_SIZE],
        })
    }
}

impl FrameSource for RawSocketCapture {
    fn next_frame(&mut self) -> Result<Option<&[u8]>, CaptureError> {
        match self.socket.read(&mut self.buffer) {
            Ok(len) => Ok(Some(&self.buffer[..len])),
            Err(e) if is_idle_error(&e) => Ok(None),
            Err(e) => Err(CaptureError::Io(e)),
        }
    }

    fn interface_name(&self) -> &str {
        ALL_INTERFACES
    }
}

impl Drop for RawSocketCapture {
    fn drop(&mut self) {
        tracing::info!("Released capture channel on all interfaces");
    }
}
