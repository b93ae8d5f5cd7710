//! MCP3202 wire format and voltage scaling. Nothing in here touches hardware.

pub mod mcp3202;
pub mod spi;
pub mod voltage;

pub use mcp3202::{command_frame, decode_reply, Channel, ChannelError, FRAME_LEN, MAX_READING};
pub use spi::SpiFrame;
pub use voltage::VoltageReference;

/// Raw readings of both channels taken in the same cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub ch0: u16,
    pub ch1: u16,
}

impl Reading {
    pub fn new(ch0: u16, ch1: u16) -> Self {
        Self { ch0, ch1 }
    }

    /// A converter that is unpowered or not wired answers with all zeros.
    pub fn has_signal(&self) -> bool {
        self.ch0 > 0 || self.ch1 > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_needs_one_positive_channel() {
        assert!(!Reading::new(0, 0).has_signal());
        assert!(Reading::new(2048, 0).has_signal());
        assert!(Reading::new(0, 1).has_signal());
    }
}
