use crate::mcp3202::{command_frame, decode_reply, Channel, FRAME_LEN};

/// One full-duplex exchange with the converter.
///
/// `rx` starts out as a copy of `tx`, the same as an in-place transfer
/// buffer, so a transfer that fails before touching it decodes to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiFrame {
    pub channel: Channel,
    pub tx: [u8; FRAME_LEN],
    pub rx: [u8; FRAME_LEN],
}

impl SpiFrame {
    pub fn command(channel: Channel) -> Self {
        let tx = command_frame(channel);
        Self { channel, tx, rx: tx }
    }

    pub fn reading(&self) -> u16 {
        decode_reply(&self.rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_frame_reads_zero() {
        let frame = SpiFrame::command(Channel::Ch1);
        assert_eq!(frame.tx, [0xF0, 0, 0]);
        assert_eq!(frame.reading(), 0);
    }

    #[test]
    fn reading_uses_rx() {
        let mut frame = SpiFrame::command(Channel::Ch0);
        frame.rx = [0x04, 0x00, 0x00];
        assert_eq!(frame.reading(), 2048);
    }
}
