use crate::os_error;
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};
use serde::Deserialize;
use thiserror::Error;
use voltlog_decode::{SpiFrame, FRAME_LEN};

#[derive(Debug, Error)]
pub enum BusError {
    #[error("{}", spi_error_text(.0))]
    Open(#[source] rppal::spi::Error),
    #[error("SPI transfer failed: {}", spi_error_text(.0))]
    Transfer(#[source] rppal::spi::Error),
    #[error("short SPI transfer: {0} of {len} bytes", len = FRAME_LEN)]
    ShortTransfer(usize),
    #[error("unsupported chip-select line CE{0}")]
    InvalidSlaveSelect(u8),
}

fn spi_error_text(e: &rppal::spi::Error) -> String {
    match e {
        rppal::spi::Error::Io(io) => os_error::describe(io),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Chip-select line on SPI0, 1 selects CE1.
    pub slave_select: u8,
    pub clock_hz: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            slave_select: 1,
            clock_hz: 900_000,
        }
    }
}

impl BusConfig {
    fn slave_select(&self) -> Result<SlaveSelect, BusError> {
        Ok(match self.slave_select {
            0 => SlaveSelect::Ss0,
            1 => SlaveSelect::Ss1,
            2 => SlaveSelect::Ss2,
            other => return Err(BusError::InvalidSlaveSelect(other)),
        })
    }
}

/// Full-duplex exchange of one converter frame.
///
/// On error `frame.rx` is left as it was.
pub trait SpiTransport {
    fn transfer(&mut self, frame: &mut SpiFrame) -> Result<(), BusError>;
}

/// SPI0 through the kernel spidev driver. The device is released on drop.
pub struct SpiBus {
    spi: Spi,
    cfg: BusConfig,
}

impl SpiBus {
    pub fn open(cfg: &BusConfig) -> Result<Self, BusError> {
        let spi = Spi::new(Bus::Spi0, cfg.slave_select()?, cfg.clock_hz, Mode::Mode0)
            .map_err(BusError::Open)?;
        log::info!(
            "opened SPI0 CE{} at {} Hz",
            cfg.slave_select,
            cfg.clock_hz
        );
        Ok(Self { spi, cfg: *cfg })
    }
}

impl SpiTransport for SpiBus {
    fn transfer(&mut self, frame: &mut SpiFrame) -> Result<(), BusError> {
        let mut rx = [0u8; FRAME_LEN];
        let n = self
            .spi
            .transfer(&mut rx, &frame.tx)
            .map_err(BusError::Transfer)?;
        if n != FRAME_LEN {
            return Err(BusError::ShortTransfer(n));
        }
        frame.rx = rx;
        log::trace!(
            "{:?} tx {} rx {}",
            frame.channel,
            hex::encode(frame.tx),
            hex::encode(frame.rx)
        );
        Ok(())
    }
}

impl Drop for SpiBus {
    fn drop(&mut self) {
        log::debug!("closing SPI0 CE{}", self.cfg.slave_select);
    }
}
