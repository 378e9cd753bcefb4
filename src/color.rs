use serde::Deserialize;

/// A pixel colour as normalized fractions, the form the compute side sends.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub fn to_rgba(self) -> [u8; 4] {
        [
            channel_byte(self.red),
            channel_byte(self.green),
            channel_byte(self.blue),
            channel_byte(self.alpha),
        ]
    }
}

fn channel_byte(fraction: f64) -> u8 {
    (fraction.clamp(0.0, 1.0) * 255.0).round() as u8
}
