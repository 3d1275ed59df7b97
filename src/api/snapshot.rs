//! Plain-value profile snapshots for transport layers.
//!
//! A snapshot owns all of its data and has no tie to the profiler that
//! produced it, so it can be handed to any encoder. With the `serde`
//! feature the types implement `Serialize`.

use std::collections::BTreeMap;

/// Per-zone trend data.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ZoneTrend {
    /// Milliseconds spent in the zone per completed frame, oldest first.
    pub history: Vec<f32>,
    /// Smoothed per-frame cost in milliseconds, rounded to 3 decimals.
    pub ema: f64,
}

impl ZoneTrend {
    /// Most recent completed frame's value.
    pub fn latest(&self) -> Option<f32> {
        self.history.last().copied()
    }

    /// Largest value in the window.
    pub fn peak(&self) -> Option<f32> {
        self.history.iter().copied().reduce(f32::max)
    }
}

/// Timing of one completed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrameInfo {
    /// 1-based frame number.
    pub sequence: u64,
    /// Clock reading when the frame began, in microseconds.
    pub start_us: u64,
    /// Frame length in microseconds.
    pub duration_us: u64,
    /// Zone records stored for the frame, at any depth.
    pub zone_count: usize,
}

/// Everything an observer gets from one poll.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProfileSnapshot {
    /// Zone name to trend. Zones with no completed frames are left out.
    pub zones: BTreeMap<String, ZoneTrend>,
    /// Completed frames covered by the histories, oldest first.
    pub frames: Vec<FrameInfo>,
    /// Sequence of the frame still being written (0 before the first frame).
    pub head_sequence: u64,
}

impl ProfileSnapshot {
    /// Trend for `name`, if reported.
    pub fn zone(&self, name: &str) -> Option<&ZoneTrend> {
        self.zones.get(name)
    }

    /// Number of reported zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether no zone was reported.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Mean frame time in milliseconds over the window.
    pub fn mean_frame_ms(&self) -> Option<f64> {
        if self.frames.is_empty() {
            return None;
        }
        let total: u64 = self.frames.iter().map(|f| f.duration_us).sum();
        Some(total as f64 / self.frames.len() as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_helpers() {
        let trend = ZoneTrend {
            history: vec![1.0, 4.5, 2.0],
            ema: 2.0,
        };
        assert_eq!(trend.latest(), Some(2.0));
        assert_eq!(trend.peak(), Some(4.5));
        assert_eq!(ZoneTrend::default().peak(), None);
    }

    #[test]
    fn test_mean_frame_time() {
        let frame = |sequence, duration_us| FrameInfo {
            sequence,
            start_us: 0,
            duration_us,
            zone_count: 0,
        };
        let snap = ProfileSnapshot {
            frames: vec![frame(1, 16_000), frame(2, 18_000)],
            ..Default::default()
        };
        assert_eq!(snap.mean_frame_ms(), Some(17.0));
        assert_eq!(ProfileSnapshot::default().mean_frame_ms(), None);
    }
}
