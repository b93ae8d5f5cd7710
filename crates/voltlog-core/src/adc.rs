use crate::bus::{BusError, SpiTransport};
use thiserror::Error;
use voltlog_decode::{Channel, ChannelError, Reading, SpiFrame};

#[derive(Debug, Error)]
pub enum AdcError {
    #[error(transparent)]
    InvalidChannel(#[from] ChannelError),
    #[error(transparent)]
    Bus(#[from] BusError),
}

/// MCP3202 driver on top of any [`SpiTransport`].
pub struct Mcp3202<B> {
    bus: B,
}

impl<B: SpiTransport> Mcp3202<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Single-ended conversion on channel `selector` (0 or 1).
    pub fn read_raw(&mut self, selector: u8) -> Result<u16, AdcError> {
        let channel = Channel::try_from(selector)?;
        self.read_channel(channel)
    }

    pub fn read_channel(&mut self, channel: Channel) -> Result<u16, AdcError> {
        let mut frame = SpiFrame::command(channel);
        self.bus.transfer(&mut frame)?;
        Ok(frame.reading())
    }

    /// Reads CH0 then CH1. A failed exchange reads as zero.
    pub fn sample(&mut self) -> Reading {
        let ch0 = self.read_or_zero(Channel::Ch0);
        let ch1 = self.read_or_zero(Channel::Ch1);
        Reading::new(ch0, ch1)
    }

    fn read_or_zero(&mut self, channel: Channel) -> u16 {
        self.read_channel(channel).unwrap_or_else(|e| {
            log::debug!("{channel:?}: {e}");
            0
        })
    }

    pub fn into_inner(self) -> B {
        self.bus
    }
}
