//! Command and reply layout of the Microchip MCP3202 (12-bit, 2 channels).

use thiserror::Error;

/// Every conversion is a single 3-byte full-duplex transfer.
pub const FRAME_LEN: usize = 3;

pub const START: u8 = 0b1000_0000;
pub const SINGLE_ENDED: u8 = 0b0100_0000;
pub const ODD_SIGN: u8 = 0b0010_0000;
pub const MSB_FIRST: u8 = 0b0001_0000;

pub const MAX_READING: u16 = 0x0FFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Ch0,
    Ch1,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Ch0, Channel::Ch1];

    pub fn index(self) -> u8 {
        match self {
            Channel::Ch0 => 0,
            Channel::Ch1 => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid MCP3202 channel {0}, expected 0 or 1")]
pub struct ChannelError(pub u8);

impl TryFrom<u8> for Channel {
    type Error = ChannelError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            0 => Ok(Channel::Ch0),
            1 => Ok(Channel::Ch1),
            other => Err(ChannelError(other)),
        }
    }
}

/// Single-ended conversion request for `channel`, MSB first.
pub fn command_frame(channel: Channel) -> [u8; FRAME_LEN] {
    let odd = match channel {
        Channel::Ch0 => 0,
        Channel::Ch1 => ODD_SIGN,
    };
    [START | SINGLE_ENDED | odd | MSB_FIRST, 0, 0]
}

/// Pulls the 12 data bits out of the reply clocked back during the transfer.
pub fn decode_reply(rx: &[u8; FRAME_LEN]) -> u16 {
    let word = (u32::from(rx[0]) << 9) | (u32::from(rx[1]) << 1) | (u32::from(rx[2]) >> 7);
    (word & u32::from(MAX_READING)) as u16
}
