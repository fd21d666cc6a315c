//! Frame decoding module.
//!
//! This module is responsible for turning raw captured bytes into
//! domain frame records.

mod frame_decoder;
#[cfg(test)]
pub(crate) mod test_frames;

pub use frame_decoder::{FrameDecoder, ETHERNET_HEADER_LEN};
