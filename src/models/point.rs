use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest value on the signal (x) axis
pub const SIGNAL_MAX: u16 = 4095;
/// Largest value on the level (y) axis
pub const LEVEL_MAX: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub signal: u16,
    pub level: u8,
}

impl Point {
    pub const fn new(signal: u16, level: u8) -> Self {
        Point { signal, level }
    }

    /// Build a point from raw pointer coordinates, clamping into the axes
    pub fn clamped(signal: i32, level: i32) -> Self {
        Point {
            signal: signal.clamp(0, SIGNAL_MAX as i32) as u16,
            level: level.clamp(0, LEVEL_MAX as i32) as u8,
        }
    }

    /// Euclidean distance in signal/level space
    pub fn distance_to(&self, signal: i32, level: i32) -> f64 {
        let dx = (self.signal as i32 - signal) as f64;
        let dy = (self.level as i32 - level) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "Red",
            Channel::Green => "Green",
            Channel::Blue => "Blue",
        }
    }

    /// Luminance weight (Rec. 709)
    pub fn weight(self) -> f64 {
        match self {
            Channel::Red => 0.2126,
            Channel::Green => 0.7152,
            Channel::Blue => 0.0722,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
