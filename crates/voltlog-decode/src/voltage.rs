use serde::Deserialize;

/// Linear scale from raw codes to volts.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct VoltageReference {
    /// Reference voltage on the VDD/VREF pin.
    pub volts: f32,
    /// Number of codes, 4096 for a 12-bit part.
    pub resolution: f32,
}

impl Default for VoltageReference {
    fn default() -> Self {
        Self {
            volts: 3.3,
            resolution: 4096.0,
        }
    }
}

impl VoltageReference {
    pub fn to_volts(&self, raw: u16) -> f32 {
        f32::from(raw) * self.volts / self.resolution
    }
}
