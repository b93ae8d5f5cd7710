use crate::bus::{BusError, SpiTransport};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use voltlog_decode::{SpiFrame, FRAME_LEN, MAX_READING};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    Reading(u16),
    Fail,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Reply>,
    sent: Vec<[u8; FRAME_LEN]>,
}

/// In-memory converter answering from a queue of readings.
///
/// Clones share the same script, so a test can keep one handle while the
/// other is owned by the driver. An empty queue answers zero, the same as
/// a converter that is not connected.
#[derive(Clone, Default)]
pub struct ScriptedBus {
    inner: Arc<Mutex<Script>>,
}

impl ScriptedBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reading(&self, raw: u16) {
        self.inner.lock().replies.push_back(Reply::Reading(raw & MAX_READING));
    }

    /// Queues one reading per channel, CH0 first.
    pub fn push_pair(&self, ch0: u16, ch1: u16) {
        self.push_reading(ch0);
        self.push_reading(ch1);
    }

    pub fn push_failure(&self) {
        self.inner.lock().replies.push_back(Reply::Fail);
    }

    /// Every frame transmitted so far, oldest first.
    pub fn sent(&self) -> Vec<[u8; FRAME_LEN]> {
        self.inner.lock().sent.clone()
    }

    pub fn pending(&self) -> usize {
        self.inner.lock().replies.len()
    }
}

/// Lays `raw` out the way the converter clocks it back.
fn encode_reply(raw: u16) -> [u8; FRAME_LEN] {
    [
        ((raw >> 9) & 0x07) as u8,
        ((raw >> 1) & 0xFF) as u8,
        ((raw & 0x01) << 7) as u8,
    ]
}

impl SpiTransport for ScriptedBus {
    fn transfer(&mut self, frame: &mut SpiFrame) -> Result<(), BusError> {
        let mut script = self.inner.lock();
        script.sent.push(frame.tx);
        match script.replies.pop_front().unwrap_or(Reply::Reading(0)) {
            Reply::Reading(raw) => {
                frame.rx = encode_reply(raw);
                Ok(())
            }
            Reply::Fail => Err(BusError::Transfer(rppal::spi::Error::Io(io::Error::new(
                io::ErrorKind::TimedOut,
                "scripted failure",
            )))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltlog_decode::{decode_reply, Channel};

    #[test]
    fn encoded_replies_decode_back() {
        for raw in [0, 1, 2, 255, 256, 2048, 4094, MAX_READING] {
            assert_eq!(decode_reply(&encode_reply(raw)), raw);
        }
    }

    #[test]
    fn records_frames_and_drains_queue() {
        let handle = ScriptedBus::new();
        let mut bus = handle.clone();
        handle.push_reading(1234);
        handle.push_failure();

        let mut frame = SpiFrame::command(Channel::Ch0);
        bus.transfer(&mut frame).unwrap();
        assert_eq!(frame.reading(), 1234);

        let mut frame = SpiFrame::command(Channel::Ch1);
        assert!(bus.transfer(&mut frame).is_err());
        assert_eq!(frame.rx, frame.tx);

        let mut frame = SpiFrame::command(Channel::Ch0);
        bus.transfer(&mut frame).unwrap();
        assert_eq!(frame.reading(), 0);

        assert_eq!(handle.pending(), 0);
        assert_eq!(handle.sent(), vec![[0xD0, 0, 0], [0xF0, 0, 0], [0xD0, 0, 0]]);
    }
}
