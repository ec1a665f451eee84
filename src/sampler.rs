use crate::curve::CurveModel;
use crate::error::{GradError, Result};
use crate::models::point::{Channel, SIGNAL_MAX};
use crate::models::style::{ColourStop, fill_style, format_stops};

/// Number of stops kept when a gradient is serialized
pub const DEFAULT_STOP_COUNT: usize = 10;

/// Reads colours off a [`CurveModel`].
#[derive(Debug, Clone, Copy)]
pub struct GradientSampler<'a> {
    model: &'a CurveModel,
}

impl<'a> GradientSampler<'a> {
    pub fn new(model: &'a CurveModel) -> Self {
        GradientSampler { model }
    }

    /// Interpolated level of `channel` at `signal`, or 0 outside every segment
    pub fn sample(&self, channel: Channel, signal: f64) -> f64 {
        let points = self.model.points(channel);
        let slopes = self.model.slopes(channel);
        for (i, w) in points.windows(2).enumerate() {
            let (a, b) = (w[0], w[1]);
            if (a.signal as f64) <= signal && signal <= (b.signal as f64) {
                return slopes[i + 1] * (signal - a.signal as f64) + a.level as f64;
            }
        }
        0.0
    }

    pub fn rgb(&self, signal: f64) -> [f64; 3] {
        Channel::ALL.map(|c| self.sample(c, signal))
    }

    /// Rounded 8-bit colour at `signal`
    pub fn rgb8(&self, signal: f64) -> [u8; 3] {
        self.rgb(signal).map(|v| v.round().clamp(0.0, 255.0) as u8)
    }

    pub fn luminance(&self, signal: f64) -> f64 {
        Channel::ALL
            .iter()
            .map(|&c| c.weight() * self.sample(c, signal))
            .sum()
    }

    /// One opaque stop per integer signal, positions `signal / 4095`
    pub fn full_gradient(&self) -> Vec<ColourStop> {
        (0..=SIGNAL_MAX)
            .map(|x| ColourStop::opaque(x as f32 / SIGNAL_MAX as f32, self.rgb8(x as f64)))
            .collect()
    }

    /// The dense gradient reduced to `count` stops
    pub fn reduced_stops(&self, count: usize) -> Result<Vec<ColourStop>> {
        reduce_stops(&self.full_gradient(), count)
    }

    /// `stop:… rgba(…)` list for the default number of stops
    pub fn gradient_string(&self) -> Result<String> {
        Ok(format_stops(&self.reduced_stops(DEFAULT_STOP_COUNT)?))
    }

    pub fn fill_style(&self) -> Result<String> {
        Ok(fill_style(&self.reduced_stops(DEFAULT_STOP_COUNT)?))
    }
}

/// Resample a sorted stop list down to `target` evenly spaced stops.
///
/// Lists that already fit are returned unchanged. Each output stop is
/// interpolated between the nearest input stop strictly below it (else the
/// first) and strictly above it (else the last); an input stop sitting exactly
/// on the target position is copied as is.
pub fn reduce_stops(stops: &[ColourStop], target: usize) -> Result<Vec<ColourStop>> {
    if stops.len() < 2 {
        return Err(GradError::TooFewStops { count: stops.len() });
    }
    if stops.len() <= target {
        return Ok(stops.to_vec());
    }
    if target < 2 {
        return Err(GradError::TooFewStops { count: target });
    }

    let reduced = (0..target)
        .map(|i| {
            let pos = i as f32 / (target - 1) as f32;

            let mut prev = &stops[0];
            let mut next = &stops[stops.len() - 1];
            for stop in stops {
                if stop.position < pos {
                    prev = stop;
                } else if stop.position == pos {
                    return ColourStop { position: pos, ..*stop };
                } else {
                    next = stop;
                    break;
                }
            }

            let span = next.position - prev.position;
            let t = if span > 0.0 {
                ((pos - prev.position) / span).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let mix = |a: u8, b: u8| ((1.0 - t) * a as f32 + t * b as f32).round() as u8;
            ColourStop {
                position: pos,
                red: mix(prev.red, next.red),
                green: mix(prev.green, next.green),
                blue: mix(prev.blue, next.blue),
                alpha: mix(prev.alpha, next.alpha),
            }
        })
        .collect();

    Ok(reduced)
}
