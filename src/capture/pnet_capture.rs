//! pnet-based frame capture on a single interface.

use pnet::datalink::{self, Channel, Config, DataLinkReceiver, NetworkInterface};

use super::{is_idle_error, FrameSource, MAX_FRAME_SIZE, READ_TIMEOUT};
use crate::error::CaptureError;

/// Frame capture using the pnet library.
pub struct PnetCapture {
    interface: NetworkInterface,
    rx: Box<dyn DataLinkReceiver>,
}

impl PnetCapture {
    /// Open a capture channel on the specified interface.
    pub fn open(interface_name: &str) -> Result<Self, CaptureError> {
        let interface = find_interface(interface_name)?;

        let config = Config {
            read_timeout: Some(READ_TIMEOUT),
            read_buffer_size: MAX_FRAME_SIZE,
            ..Config::default()
        };

        let rx = match datalink::channel(&interface, config) {
            Ok(Channel::Ethernet(_tx, rx)) => rx,
            Ok(_) => {
                return Err(CaptureError::ChannelCreation(
                    "unsupported channel type".to_string(),
                ))
            }
            Err(e) => return Err(CaptureError::from_open_error(e)),
        };

        tracing::info!("Opened capture channel on {}", interface.name);
        Ok(Self { interface, rx })
    }

    /// List all available network interfaces.
    pub fn list_interfaces() -> Vec<String> {
        datalink::interfaces()
            .into_iter()
            .map(|iface| {
                let status = if iface.is_up() { "UP" } else { "DOWN" };
                let ips: Vec<_> = iface.ips.iter().map(|ip| ip.to_string()).collect();
                format!(
                    "{}: {} [{}]",
                    iface.name,
                    status,
                    if ips.is_empty() {
                        "no IP".to_string()
                    } else {
                        ips.join(", ")
                    }
                )
            })
            .collect()
    }
}

impl FrameSource for PnetCapture {
    fn next_frame(&mut self) -> Result<Option<&[u8]>, CaptureError> {
        match self.rx.next() {
            Ok(frame) => Ok(Some(frame)),
            Err(e) if is_idle_error(&e) => Ok(None),
            Err(e) => Err(CaptureError::Io(e)),
        }
    }

    fn interface_name(&self) -> &str {
        &self.interface.name
    }
}

impl Drop for PnetCapture {
    fn drop(&mut self) {
        tracing::info!("Released capture channel on {}", self.interface.name);
    }
}

fn find_interface(interface_name: &str) -> Result<NetworkInterface, CaptureError> {
    datalink::interfaces()
        .into_iter()
        .find(|iface| iface.name == interface_name)
        .ok_or_else(|| CaptureError::InterfaceNotFound(interface_name.to_string()))
}
