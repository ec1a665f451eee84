use crate::error::{GradError, Result};
use std::fmt;
use std::str::FromStr;

/// One stop of a horizontal gradient; `position` runs 0 → 1 left to right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColourStop {
    pub position: f32,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl ColourStop {
    pub fn opaque(position: f32, [red, green, blue]: [u8; 3]) -> Self {
        ColourStop {
            position,
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    pub fn rgba(&self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    pub fn to_colorgrad(&self) -> colorgrad::Color {
        colorgrad::Color::from_rgba8(self.red, self.green, self.blue, self.alpha)
    }
}

/// Formats as `stop:0.500 rgba(12,34,56,255)`
impl fmt::Display for ColourStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stop:{:.3} rgba({},{},{},{})",
            self.position, self.red, self.green, self.blue, self.alpha
        )
    }
}

impl FromStr for ColourStop {
    type Err = GradError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| GradError::InvalidStop {
            text: s.to_string(),
            reason: reason.to_string(),
        };

        let (position, colour) = s
            .trim()
            .split_once(char::is_whitespace)
            .ok_or_else(|| invalid("expected 'stop:<pos> rgba(r,g,b,a)'"))?;

        let position: f32 = position
            .strip_prefix("stop:")
            .ok_or_else(|| invalid("missing 'stop:' prefix"))?
            .parse()
            .map_err(|e| invalid(&format!("invalid position: {}", e)))?;
        if !(0.0..=1.0).contains(&position) {
            return Err(invalid("position must lie in [0, 1]"));
        }

        let inner = colour
            .trim()
            .strip_prefix("rgba(")
            .and_then(|c| c.strip_suffix(')'))
            .ok_or_else(|| invalid("colour must be written as rgba(r,g,b,a)"))?;
        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() != 4 {
            return Err(invalid("rgba() takes exactly 4 components"));
        }
        let mut rgba = [0u8; 4];
        for (slot, part) in rgba.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|e| invalid(&format!("invalid component '{}': {}", part.trim(), e)))?;
        }

        Ok(ColourStop {
            position,
            red: rgba[0],
            green: rgba[1],
            blue: rgba[2],
            alpha: rgba[3],
        })
    }
}

/// Join stops into the comma separated form used by gradient fill styles
pub fn format_stops(stops: &[ColourStop]) -> String {
    stops
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn parse_stops(text: &str) -> Result<Vec<ColourStop>> {
    text.split(", ")
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Wrap a stop string into a left-to-right `qlineargradient` fill
pub fn fill_style(stops: &[ColourStop]) -> String {
    format!(
        "qlineargradient(spread:pad, x1:0, y1:0, x2:1, y2:0, {})",
        format_stops(stops)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_three_decimals() {
        let stop = ColourStop {
            position: 0.5,
            red: 12,
            green: 34,
            blue: 56,
            alpha: 255,
        };
        assert_eq!(stop.to_string(), "stop:0.500 rgba(12,34,56,255)");
    }

    #[test]
    fn test_parse_stop_string() {
        let stops = parse_stops("stop:0.000 rgba(0,0,0,255), stop:1.000 rgba(255,128,7,200)")
            .expect("valid stop string");
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].rgba(), [0, 0, 0, 255]);
        assert_eq!(stops[1].position, 1.0);
        assert_eq!(stops[1].rgba(), [255, 128, 7, 200]);
    }

    #[test]
    fn test_parse_rejects_malformed_stops() {
        for bad in [
            "0.5 rgba(1,2,3,4)",
            "stop:abc rgba(1,2,3,4)",
            "stop:1.5 rgba(1,2,3,4)",
            "stop:0.5 rgb(1,2,3)",
            "stop:0.5 rgba(1,2,3)",
            "stop:0.5 rgba(1,2,300,4)",
            "stop:0.5",
        ] {
            assert!(bad.parse::<ColourStop>().is_err(), "accepted '{}'", bad);
        }
    }

    #[test]
    fn test_fill_style() {
        let stops = [
            ColourStop::opaque(0.0, [0, 0, 0]),
            ColourStop::opaque(1.0, [255, 255, 255]),
        ];
        assert_eq!(
            fill_style(&stops),
            "qlineargradient(spread:pad, x1:0, y1:0, x2:1, y2:0, \
             stop:0.000 rgba(0,0,0,255), stop:1.000 rgba(255,255,255,255))"
        );
    }
}
