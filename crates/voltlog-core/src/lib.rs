//! Core functionalities: SPI transport, MCP3202 driver, voltage log, polling loop.

pub mod adc;
pub mod backoff;
pub mod bus;
mod os_error;
pub mod record;
pub mod recorder;
#[cfg(any(test, feature = "testing"))]
pub mod scripted;
pub mod settings;
pub mod shutdown;
pub mod voltage_log;

pub use adc::{AdcError, Mcp3202};
pub use backoff::Backoff;
pub use bus::{BusConfig, BusError, SpiBus, SpiTransport};
pub use record::VoltageRecord;
pub use recorder::{Cycle, Recorder, Summary};
#[cfg(any(test, feature = "testing"))]
pub use scripted::ScriptedBus;
pub use settings::{Settings, SettingsError};
pub use shutdown::{Shutdown, ShutdownHandle};
pub use voltage_log::{LogWriteError, VoltageLog, FINISH_MARKER, START_MARKER};

pub use voltlog_decode::{Channel, Reading, VoltageReference};
