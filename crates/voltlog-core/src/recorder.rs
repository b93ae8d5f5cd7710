use crate::adc::Mcp3202;
use crate::backoff::Backoff;
use crate::bus::SpiTransport;
use crate::record::VoltageRecord;
use crate::settings::Settings;
use crate::shutdown::Shutdown;
use crate::voltage_log::{VoltageLog, FINISH_MARKER, START_MARKER};
use chrono::{DateTime, Local};
use std::time::Duration;
use voltlog_decode::VoltageReference;

/// Result of one sampling cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Cycle {
    Recorded(VoltageRecord),
    NoAnswer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub cycles: u64,
    pub recorded: u64,
}

pub struct Recorder<B> {
    adc: Mcp3202<B>,
    log: VoltageLog,
    vref: VoltageReference,
    backoff: Backoff,
    epoch: DateTime<Local>,
    chip_select: u8,
    clock: fn() -> DateTime<Local>,
    summary: Summary,
}

impl<B: SpiTransport> Recorder<B> {
    pub fn new(adc: Mcp3202<B>, settings: &Settings) -> Self {
        Self {
            adc,
            log: VoltageLog::new(&settings.log_path),
            vref: settings.reference,
            backoff: Backoff::new(settings.base_interval(), settings.max_backoff),
            epoch: settings.epoch_local(),
            chip_select: settings.bus.slave_select,
            clock: Local::now,
            summary: Summary {
                cycles: 0,
                recorded: 0,
            },
        }
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    pub fn backoff(&self) -> &Backoff {
        &self.backoff
    }

    pub fn log(&self) -> &VoltageLog {
        &self.log
    }

    /// Samples both channels once, prints and logs the result and adjusts
    /// the backoff. Does not sleep.
    pub fn step(&mut self) -> Cycle {
        self.summary.cycles += 1;
        let reading = self.adc.sample();
        let now = (self.clock)();

        if reading.has_signal() {
            let record = VoltageRecord::new(now, self.epoch, reading, &self.vref);
            println!("{}", record.status_line(self.chip_select));
            self.log.store(&record.log_line());
            if self.backoff.factor() > 1 {
                log::info!("converter answering again");
            }
            self.backoff.reset();
            self.summary.recorded += 1;
            Cycle::Recorded(record)
        } else {
            eprintln!("no answer");
            self.backoff.increase();
            log::debug!(
                "cycle {}: no answer, next poll in {:?}",
                self.summary.cycles,
                self.backoff.delay()
            );
            Cycle::NoAnswer
        }
    }

    /// Runs cycles until `shutdown` is requested, then releases the bus.
    ///
    /// The request is only looked at after a full cycle including its sleep,
    /// so at least one cycle always runs.
    pub fn run(mut self, shutdown: &Shutdown, mut sleep: impl FnMut(Duration)) -> Summary {
        self.log.store(START_MARKER);
        loop {
            self.step();
            sleep(self.backoff.delay());
            if shutdown.is_requested() {
                break;
            }
        }

        let Self {
            adc,
            log: voltage_log,
            summary,
            ..
        } = self;
        drop(adc.into_inner());
        voltage_log.store(FINISH_MARKER);
        log::info!(
            "stopped after {} cycles, {} recorded",
            summary.cycles,
            summary.recorded
        );
        summary
    }
}
