use crate::error::{GradError, Result};
use crate::models::point::{Channel, LEVEL_MAX, Point, SIGNAL_MAX};
use tracing::debug;

/// Fewest points a channel may hold (the two anchors)
pub const MIN_POINTS: usize = 2;
/// Most points a channel may hold
pub const MAX_POINTS: usize = 20;
/// `move_point` only considers points closer than this in signal/level space
pub const MOVE_RADIUS: f64 = 200.0;

/// Per-channel control points plus the slopes derived from them.
///
/// Every channel is sorted by signal, holds between [`MIN_POINTS`] and
/// [`MAX_POINTS`] points, and starts at signal 0 and ends at
/// [`SIGNAL_MAX`]. `slopes[c][0]` is a zero sentinel and `slopes[c][i]` is
/// the slope of the segment ending at point `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveModel {
    points: [Vec<Point>; 3],
    slopes: [Vec<f64>; 3],
}

impl Default for CurveModel {
    fn default() -> Self {
        CurveModel::from_points(std::array::from_fn(|_| default_points()))
    }
}

fn default_points() -> Vec<Point> {
    vec![Point::new(0, 0), Point::new(SIGNAL_MAX, LEVEL_MAX)]
}

/// Slopes for one channel, with a leading zero so the table lines up with points
pub fn compute_slopes(points: &[Point]) -> Vec<f64> {
    let mut slopes = Vec::with_capacity(points.len());
    slopes.push(0.0);
    for w in points.windows(2) {
        let dx = w[1].signal as f64 - w[0].signal as f64;
        let dy = w[1].level as f64 - w[0].level as f64;
        // zero-width segment contributes nothing
        slopes.push(if dx == 0.0 { 0.0 } else { dy / dx });
    }
    slopes
}

impl CurveModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_points(points: [Vec<Point>; 3]) -> Self {
        let slopes = std::array::from_fn(|i| compute_slopes(&points[i]));
        CurveModel { points, slopes }
    }

    /// Build a model from explicit point lists, validating each channel
    pub fn from_channels(red: Vec<Point>, green: Vec<Point>, blue: Vec<Point>) -> Result<Self> {
        let points = [red, green, blue];
        for channel in Channel::ALL {
            validate_channel(channel, &points[channel.index()])?;
        }
        Ok(Self::from_points(points))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
        debug!("curve reset to defaults");
    }

    pub fn points(&self, channel: Channel) -> &[Point] {
        &self.points[channel.index()]
    }

    pub fn slopes(&self, channel: Channel) -> &[f64] {
        &self.slopes[channel.index()]
    }

    pub fn len(&self, channel: Channel) -> usize {
        self.points[channel.index()].len()
    }

    /// True when all three channels hold points at the same signals
    pub fn is_synchronized(&self) -> bool {
        let [r, g, b] = &self.points;
        r.len() == g.len()
            && r.len() == b.len()
            && r.iter()
                .zip(g)
                .zip(b)
                .all(|((r, g), b)| r.signal == g.signal && r.signal == b.signal)
    }

    pub fn ensure_synchronized(&self) -> Result<()> {
        if self.is_synchronized() {
            return Ok(());
        }
        Err(GradError::ChannelsOutOfSync {
            red: self.len(Channel::Red),
            green: self.len(Channel::Green),
            blue: self.len(Channel::Blue),
        })
    }

    /// Recompute the slope table of one channel after its points changed
    pub fn compute_slopes(&mut self, channel: Channel) {
        let i = channel.index();
        self.slopes[i] = compute_slopes(&self.points[i]);
    }

    /// Index of the first point whose box `|Δsignal| < radius && |Δlevel| < radius`
    /// contains the given coordinates
    pub fn point_near(
        &self,
        channel: Channel,
        signal: i32,
        level: i32,
        radius: i32,
    ) -> Option<usize> {
        self.points(channel).iter().position(|p| {
            (p.signal as i32 - signal).abs() < radius && (p.level as i32 - level).abs() < radius
        })
    }

    /// Add a point at the same signal in every channel.
    ///
    /// Validated once for all channels, so either every channel gains the
    /// point or none does.
    pub fn insert_point(&mut self, signal: i32, level: i32) -> Result<()> {
        let point = Point::clamped(signal, level);

        for channel in Channel::ALL {
            let points = self.points(channel);
            if points.len() >= MAX_POINTS {
                return Err(GradError::ChannelFull {
                    channel,
                    max: MAX_POINTS,
                });
            }
            if points.iter().any(|p| p.signal == point.signal) {
                return Err(GradError::SignalTaken {
                    signal: point.signal,
                });
            }
        }

        for channel in Channel::ALL {
            let points = &mut self.points[channel.index()];
            points.push(point);
            points.sort_by_key(|p| p.signal);
            self.compute_slopes(channel);
        }
        debug!(signal = point.signal, level = point.level, "inserted point in all channels");
        Ok(())
    }

    /// Remove one point from a single channel; anchors and the last two points stay.
    pub fn remove_point(&mut self, channel: Channel, index: usize) -> Result<Point> {
        let len = self.len(channel);
        if index >= len {
            return Err(GradError::NoSuchPoint { channel, index });
        }
        if len <= MIN_POINTS {
            return Err(GradError::TooFewPoints {
                channel,
                min: MIN_POINTS,
            });
        }
        if index == 0 || index == len - 1 {
            return Err(GradError::AnchorPoint { channel, index });
        }

        let removed = self.points[channel.index()].remove(index);
        self.compute_slopes(channel);
        debug!(%channel, index, signal = removed.signal, "removed point");
        Ok(removed)
    }

    /// Rewrite the level of the point at `index`, clamped to the level axis
    pub fn set_level(&mut self, channel: Channel, index: usize, level: i32) -> Result<()> {
        let point = self.points[channel.index()]
            .get_mut(index)
            .ok_or(GradError::NoSuchPoint { channel, index })?;
        point.level = level.clamp(0, LEVEL_MAX as i32) as u8;
        self.compute_slopes(channel);
        Ok(())
    }

    /// Move the closest point to `target` (within [`MOVE_RADIUS`]) to `new_level`.
    ///
    /// Only the level changes; the point keeps its signal. Returns the index
    /// of the point that moved.
    pub fn move_point(
        &mut self,
        channel: Channel,
        target: (i32, i32),
        new_level: i32,
    ) -> Result<usize> {
        let target = Point::clamped(target.0, target.1);
        let (sx, ly) = (target.signal as i32, target.level as i32);

        let index = self
            .points(channel)
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.distance_to(sx, ly)))
            .filter(|&(_, d)| d < MOVE_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
            .ok_or(GradError::NoPointNear {
                channel,
                signal: sx,
                level: ly,
            })?;

        self.set_level(channel, index, new_level)?;
        debug!(%channel, index, level = new_level, "moved point");
        Ok(index)
    }

    /// Move the signal of row `index` in every channel, keeping order and anchors
    pub fn set_signal(&mut self, index: usize, signal: u16) -> Result<()> {
        self.ensure_synchronized()?;
        let len = self.len(Channel::Red);
        if index >= len {
            return Err(GradError::NoSuchPoint {
                channel: Channel::Red,
                index,
            });
        }
        if index == 0 || index == len - 1 {
            return Err(GradError::AnchorPoint {
                channel: Channel::Red,
                index,
            });
        }

        let reds = self.points(Channel::Red);
        let (below, above) = (reds[index - 1].signal, reds[index + 1].signal);
        if signal == below || signal == above {
            return Err(GradError::SignalTaken { signal });
        }
        if signal < below || signal > above {
            return Err(GradError::SignalOutOfOrder {
                signal,
                below,
                above,
            });
        }

        for channel in Channel::ALL {
            self.points[channel.index()][index].signal = signal;
            self.compute_slopes(channel);
        }
        debug!(index, signal, "moved row signal");
        Ok(())
    }
}

fn validate_channel(channel: Channel, points: &[Point]) -> Result<()> {
    let invalid = |reason: String| Err(GradError::InvalidCurve { channel, reason });

    if !(MIN_POINTS..=MAX_POINTS).contains(&points.len()) {
        return invalid(format!(
            "expected {}..={} points, found {}",
            MIN_POINTS,
            MAX_POINTS,
            points.len()
        ));
    }
    if points.iter().any(|p| p.signal > SIGNAL_MAX) {
        return invalid(format!("signals must not exceed {}", SIGNAL_MAX));
    }
    if points.windows(2).any(|w| w[0].signal >= w[1].signal) {
        return invalid("signals must be strictly increasing".to_string());
    }
    let (first, last) = (points[0], points[points.len() - 1]);
    if first.signal != 0 || last.signal != SIGNAL_MAX {
        return invalid(format!(
            "curve must span 0..={}, spans {}..={}",
            SIGNAL_MAX, first.signal, last.signal
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(model: &CurveModel, channel: Channel) -> Vec<u16> {
        model.points(channel).iter().map(|p| p.signal).collect()
    }

    #[test]
    fn test_default_model() {
        let model = CurveModel::new();
        for channel in Channel::ALL {
            assert_eq!(
                model.points(channel),
                &[Point::new(0, 0), Point::new(4095, 255)]
            );
            assert_eq!(model.slopes(channel), &[0.0, 255.0 / 4095.0]);
        }
        assert!(model.is_synchronized());
    }

    #[test]
    fn test_insert_propagates_to_all_channels() {
        let mut model = CurveModel::new();
        model.insert_point(2048, 100).unwrap();

        assert_eq!(
            model.points(Channel::Red),
            &[Point::new(0, 0), Point::new(2048, 100), Point::new(4095, 255)]
        );
        for channel in [Channel::Green, Channel::Blue] {
            assert_eq!(signals(&model, channel), vec![0, 2048, 4095]);
        }
        for channel in Channel::ALL {
            assert_eq!(model.slopes(channel).len(), model.points(channel).len());
        }
    }

    #[test]
    fn test_insert_keeps_points_sorted() {
        let mut model = CurveModel::new();
        for s in [3000, 100, 2000, 50] {
            model.insert_point(s, 10).unwrap();
        }
        assert_eq!(signals(&model, Channel::Red), vec![0, 50, 100, 2000, 3000, 4095]);
    }

    #[test]
    fn test_insert_rejects_duplicate_signal() {
        let mut model = CurveModel::new();
        model.insert_point(1000, 50).unwrap();
        let before = model.clone();
        assert!(matches!(
            model.insert_point(1000, 90),
            Err(GradError::SignalTaken { signal: 1000 })
        ));
        assert!(matches!(
            model.insert_point(0, 90),
            Err(GradError::SignalTaken { signal: 0 })
        ));
        assert_eq!(model, before);
    }

    #[test]
    fn test_insert_clamps_pointer_coordinates() {
        let mut model = CurveModel::new();
        model.insert_point(1500, 400).unwrap();
        assert_eq!(model.points(Channel::Blue)[1], Point::new(1500, 255));
    }

    #[test]
    fn test_insert_rejected_when_any_channel_full() {
        let mut model = CurveModel::new();
        for i in 1..(MAX_POINTS as i32 - 1) {
            model.insert_point(i * 100, 10).unwrap();
        }
        assert_eq!(model.len(Channel::Red), MAX_POINTS);

        // Free a slot in Red only; Green and Blue are still full
        model.remove_point(Channel::Red, 3).unwrap();
        let before = model.clone();
        assert!(matches!(
            model.insert_point(3500, 10),
            Err(GradError::ChannelFull { .. })
        ));
        assert_eq!(model, before);
    }

    #[test]
    fn test_remove_stops_at_two_points() {
        let mut model = CurveModel::new();
        model.insert_point(1000, 20).unwrap();
        let removed = model.remove_point(Channel::Green, 1).unwrap();
        assert_eq!(removed.signal, 1000);
        assert_eq!(model.len(Channel::Green), 2);
        assert_eq!(model.len(Channel::Red), 3);

        let before = model.clone();
        for index in 0..3 {
            assert!(model.remove_point(Channel::Green, index).is_err());
        }
        assert_eq!(model, before);
        assert!(!model.is_synchronized());
    }

    #[test]
    fn test_remove_keeps_anchors() {
        let mut model = CurveModel::new();
        model.insert_point(1000, 20).unwrap();
        model.insert_point(2000, 20).unwrap();
        assert!(matches!(
            model.remove_point(Channel::Red, 0),
            Err(GradError::AnchorPoint { index: 0, .. })
        ));
        assert!(matches!(
            model.remove_point(Channel::Red, 3),
            Err(GradError::AnchorPoint { index: 3, .. })
        ));
        assert!(matches!(
            model.remove_point(Channel::Red, 9),
            Err(GradError::NoSuchPoint { index: 9, .. })
        ));
    }

    #[test]
    fn test_move_changes_level_only() {
        let mut model = CurveModel::new();
        model.insert_point(2048, 100).unwrap();

        let index = model.move_point(Channel::Red, (2060, 120), 180).unwrap();
        assert_eq!(index, 1);
        assert_eq!(model.points(Channel::Red)[1], Point::new(2048, 180));
        // other channels untouched
        assert_eq!(model.points(Channel::Green)[1], Point::new(2048, 100));
        assert_eq!(model.slopes(Channel::Red)[1], 180.0 / 2048.0);
    }

    #[test]
    fn test_move_picks_closest_and_clamps_level() {
        let mut model = CurveModel::new();
        model.insert_point(100, 0).unwrap();
        model.insert_point(250, 0).unwrap();

        // within radius of 0, 100 and 250; 250 is closest
        let index = model.move_point(Channel::Blue, (240, 0), 999).unwrap();
        assert_eq!(index, 2);
        assert_eq!(model.points(Channel::Blue)[2].level, 255);

        let index = model.move_point(Channel::Blue, (-40, -40), -5).unwrap();
        assert_eq!(index, 0);
        assert_eq!(model.points(Channel::Blue)[0].level, 0);
    }

    #[test]
    fn test_move_without_nearby_point() {
        let mut model = CurveModel::new();
        let before = model.clone();
        assert!(matches!(
            model.move_point(Channel::Red, (2000, 128), 10),
            Err(GradError::NoPointNear { .. })
        ));
        assert_eq!(model, before);
    }

    #[test]
    fn test_zero_width_segment_has_zero_slope() {
        let points = [
            Point::new(0, 0),
            Point::new(10, 50),
            Point::new(10, 90),
            Point::new(20, 100),
        ];
        assert_eq!(compute_slopes(&points), vec![0.0, 5.0, 0.0, 1.0]);
    }

    #[test]
    fn test_set_signal_respects_neighbours() {
        let mut model = CurveModel::new();
        model.insert_point(1000, 20).unwrap();
        model.insert_point(2000, 40).unwrap();

        model.set_signal(1, 1500).unwrap();
        assert_eq!(signals(&model, Channel::Blue), vec![0, 1500, 2000, 4095]);

        let before = model.clone();
        assert!(matches!(
            model.set_signal(1, 2000),
            Err(GradError::SignalTaken { signal: 2000 })
        ));
        assert!(matches!(
            model.set_signal(1, 3000),
            Err(GradError::SignalOutOfOrder {
                signal: 3000,
                below: 0,
                above: 2000
            })
        ));
        assert!(model.set_signal(0, 10).is_err());
        assert!(model.set_signal(3, 10).is_err());
        assert_eq!(model, before);
    }

    #[test]
    fn test_from_channels_validation() {
        let ok = vec![Point::new(0, 0), Point::new(4095, 255)];
        assert!(CurveModel::from_channels(ok.clone(), ok.clone(), ok.clone()).is_ok());

        let short = vec![Point::new(0, 0)];
        assert!(CurveModel::from_channels(short, ok.clone(), ok.clone()).is_err());

        let unsorted = vec![
            Point::new(0, 0),
            Point::new(3000, 1),
            Point::new(2000, 2),
            Point::new(4095, 3),
        ];
        assert!(CurveModel::from_channels(ok.clone(), unsorted, ok.clone()).is_err());

        let partial = vec![Point::new(10, 0), Point::new(4095, 255)];
        assert!(CurveModel::from_channels(ok.clone(), ok, partial).is_err());
    }

    #[test]
    fn test_from_channels_rejects_shared_signals() {
        let ok = vec![Point::new(0, 0), Point::new(4095, 255)];
        let duplicates = [
            vec![Point::new(0, 0), Point::new(0, 90), Point::new(4095, 255)],
            vec![
                Point::new(0, 0),
                Point::new(2000, 10),
                Point::new(2000, 90),
                Point::new(4095, 255),
            ],
            vec![Point::new(0, 0), Point::new(4095, 10), Point::new(4095, 200)],
        ];
        for points in duplicates {
            for channel in Channel::ALL {
                let mut channels = [ok.clone(), ok.clone(), ok.clone()];
                channels[channel.index()] = points.clone();
                let [red, green, blue] = channels;
                assert!(
                    matches!(
                        CurveModel::from_channels(red, green, blue),
                        Err(GradError::InvalidCurve { .. })
                    ),
                    "accepted {:?} for {}",
                    points,
                    channel
                );
            }
        }
    }

    #[test]
    fn test_reset() {
        let mut model = CurveModel::new();
        model.insert_point(100, 100).unwrap();
        model.reset();
        assert_eq!(model, CurveModel::default());
    }
}
