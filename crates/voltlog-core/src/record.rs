use chrono::{DateTime, Local};
use voltlog_decode::{Reading, VoltageReference};

pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// One successful cycle, ready to be printed and logged.
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageRecord {
    pub taken_at: DateTime<Local>,
    /// Whole seconds since the reference epoch, floored.
    pub elapsed_secs: i64,
    pub reading: Reading,
    pub volts: [f32; 2],
}

impl VoltageRecord {
    pub fn new(
        taken_at: DateTime<Local>,
        epoch: DateTime<Local>,
        reading: Reading,
        vref: &VoltageReference,
    ) -> Self {
        // Both sides are floored to whole seconds; the epoch has no fraction.
        let elapsed_secs = taken_at.timestamp() - epoch.timestamp();
        Self {
            taken_at,
            elapsed_secs,
            reading,
            volts: [vref.to_volts(reading.ch0), vref.to_volts(reading.ch1)],
        }
    }

    pub fn timestamp(&self) -> String {
        self.taken_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Tab separated: timestamp, elapsed seconds, CH0 volts, CH1 volts.
    pub fn log_line(&self) -> String {
        format!(
            "{}\t{}\t{:.3}\t{:.3}",
            self.timestamp(),
            self.elapsed_secs,
            self.volts[0],
            self.volts[1]
        )
    }

    pub fn status_line(&self, chip_select: u8) -> String {
        format!(
            "MCP3202(CE{}): '{}' CH 0,1 = {:04}, {:04} -> {:.3}, {:.3} V",
            chip_select,
            self.timestamp(),
            self.reading.ch0,
            self.reading.ch1,
            self.volts[0],
            self.volts[1]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn epoch() -> DateTime<Local> {
        Local.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).single().unwrap()
    }

    #[test]
    fn formats_half_scale_on_ch0() {
        let at = Local.with_ymd_and_hms(2019, 1, 2, 3, 4, 5).single().unwrap();
        let rec = VoltageRecord::new(
            at,
            epoch(),
            Reading::new(2048, 0),
            &VoltageReference::default(),
        );

        assert_eq!(rec.elapsed_secs, 86_400 + 3 * 3600 + 4 * 60 + 5);
        assert_eq!(rec.log_line(), "02.01.2019 03:04:05\t97445\t1.650\t0.000");
        assert_eq!(
            rec.status_line(1),
            "MCP3202(CE1): '02.01.2019 03:04:05' CH 0,1 = 2048, 0000 -> 1.650, 0.000 V"
        );
    }

    #[test]
    fn full_scale_rounds_to_3_299() {
        let rec = VoltageRecord::new(
            epoch(),
            epoch(),
            Reading::new(4095, 7),
            &VoltageReference::default(),
        );
        assert_eq!(rec.elapsed_secs, 0);
        assert_eq!(rec.log_line(), "01.01.2019 00:00:00\t0\t3.299\t0.006");
        assert!(rec.status_line(1).contains("4095, 0007 -> 3.299, 0.006 V"));
    }

    #[test]
    fn elapsed_ignores_sub_second_part() {
        let at = epoch() + chrono::Duration::milliseconds(59_999);
        let rec = VoltageRecord::new(
            at,
            epoch(),
            Reading::new(1, 0),
            &VoltageReference::default(),
        );
        assert_eq!(rec.elapsed_secs, 59);
    }
}
