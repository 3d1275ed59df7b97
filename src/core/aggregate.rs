//! Read-side aggregation: per-zone history and smoothed trend.

use std::collections::BTreeMap;

use crate::api::snapshot::{FrameInfo, ProfileSnapshot, ZoneTrend};
use crate::core::names::{NameTable, ZoneId};
use crate::core::ring::FrameRing;
use crate::sync::mutex::Mutex;

/// EMA values below this are treated as "no baseline yet".
pub const EMA_BOOTSTRAP_EPSILON: f64 = 0.001;

struct EmaState {
    /// Indexed by [`ZoneId::index`].
    ema: Vec<f64>,
    /// Newest frame sequence already folded into `ema`.
    folded_through: u64,
}

/// Turns completed frames into a [`ProfileSnapshot`].
///
/// The EMA carries over between calls. Each frame contributes to it exactly
/// once, so snapshotting twice without new frames yields the same values.
pub struct Aggregator {
    smoothing: f64,
    spike_clamp: f64,
    state: Mutex<EmaState>,
}

impl Aggregator {
    /// Create an aggregator with the given EMA factor and spike clamp multiplier.
    pub fn new(smoothing: f64, spike_clamp: f64) -> Self {
        Self {
            smoothing,
            spike_clamp,
            state: Mutex::new(EmaState {
                ema: Vec::new(),
                folded_through: 0,
            }),
        }
    }

    /// Walk the completed frames of `ring` and produce a snapshot.
    ///
    /// Never touches the active slot and never blocks the writer. Concurrent
    /// callers only contend on the EMA state.
    pub fn snapshot(&self, ring: &FrameRing, names: &NameTable) -> ProfileSnapshot {
        let completed = ring.completed();
        let head_sequence = completed.head_sequence();
        let names = names.names();

        let mut frames = Vec::new();
        let mut histories: Vec<Vec<f32>> = vec![Vec::new(); names.len()];
        let mut accum = vec![0.0f32; names.len()];

        for slot in completed {
            accum.iter_mut().for_each(|v| *v = 0.0);
            let mut zone_count = 0;
            for record in slot.records() {
                zone_count += 1;
                // Only top-level zones: children already sit inside their parent's time.
                if record.depth == 0 && record.zone.index() < names.len() {
                    accum[record.zone.index()] += record.duration_us as f32 / 1000.0;
                }
            }
            for (history, value) in histories.iter_mut().zip(&accum) {
                history.push(*value);
            }
            frames.push(FrameInfo {
                sequence: slot.sequence(),
                start_us: slot.start_us(),
                duration_us: slot.duration_us(),
                zone_count,
            });
        }

        frames.reverse();
        for history in &mut histories {
            history.reverse();
        }

        let emas = self.fold(&frames, &histories);

        let zones = names
            .iter()
            .zip(histories)
            .zip(emas)
            .filter(|((_, history), _)| !history.is_empty())
            .map(|((name, history), ema)| {
                let trend = ZoneTrend {
                    history,
                    ema: (ema * 1000.0).round() / 1000.0,
                };
                (name.to_string(), trend)
            })
            .collect::<BTreeMap<_, _>>();

        ProfileSnapshot {
            zones,
            frames,
            head_sequence,
        }
    }

    /// Current unrounded EMA for `zone`, if it has one.
    pub fn ema(&self, zone: ZoneId) -> Option<f64> {
        self.state.lock().ema.get(zone.index()).copied()
    }

    /// Fold frames newer than the last snapshot into the EMA; returns the
    /// per-zone values afterwards.
    fn fold(&self, frames: &[FrameInfo], histories: &[Vec<f32>]) -> Vec<f64> {
        let mut state = self.state.lock();
        if state.ema.len() < histories.len() {
            state.ema.resize(histories.len(), 0.0);
        }

        let newest = frames.last().map_or(0, |f| f.sequence);
        if newest > state.folded_through {
            let first_new = frames
                .iter()
                .position(|f| f.sequence > state.folded_through)
                .unwrap_or(frames.len());

            for (zone, history) in histories.iter().enumerate() {
                let mut ema = state.ema[zone];
                for &value in &history[first_new..] {
                    ema = step(ema, value as f64, self.smoothing, self.spike_clamp);
                }
                state.ema[zone] = ema;
            }
            state.folded_through = newest;
        }

        state.ema[..histories.len()].to_vec()
    }
}

/// One EMA update with spike clamping.
#[inline]
fn step(ema: f64, value: f64, smoothing: f64, spike_clamp: f64) -> f64 {
    if ema < EMA_BOOTSTRAP_EPSILON {
        return value;
    }
    let clamped = value.min(ema * spike_clamp);
    ema + smoothing * (clamped - ema)
}
