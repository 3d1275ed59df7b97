//! Fixed-capacity frame history.
//!
//! The ring owns one slot per retained frame and a single write head. The
//! writer fills the slot under the head, then advances the head with a
//! release store; readers acquire the head and only ever look at slots
//! behind it.
//!
//! Every slot field is an atomic. A reader that is slow enough to be lapped
//! by the writer sees stale or mixed values, never a data race, and the
//! sequence check in [`CompletedFrames`] stops the walk as soon as it notices.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::thread::{self, ThreadId};

use crate::core::names::ZoneId;
use crate::diagnostics;

/// One bracketed measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRecord {
    /// Which zone.
    pub zone: ZoneId,
    /// Nesting level at entry; 0 is top level.
    pub depth: u16,
    /// Elapsed time in microseconds.
    pub duration_us: u32,
}

impl ZoneRecord {
    #[inline]
    fn pack(self) -> u64 {
        ((self.zone.0 as u64) << 48) | ((self.depth as u64) << 32) | self.duration_us as u64
    }

    #[inline]
    fn unpack(bits: u64) -> Self {
        Self {
            zone: ZoneId((bits >> 48) as u16),
            depth: (bits >> 32) as u16,
            duration_us: bits as u32,
        }
    }
}

/// Storage for a single frame.
pub struct FrameSlot {
    /// 1-based frame number; 0 means the slot was never written.
    sequence: AtomicU64,
    start_us: AtomicU64,
    duration_us: AtomicU64,
    count: AtomicU32,
    records: Box<[AtomicU64]>,
}

impl FrameSlot {
    fn new(max_zones: usize) -> Self {
        Self {
            sequence: AtomicU64::new(0),
            start_us: AtomicU64::new(0),
            duration_us: AtomicU64::new(0),
            count: AtomicU32::new(0),
            records: (0..max_zones).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    /// Frame number, or 0 if never written.
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }

    /// Clock reading when the frame began.
    pub fn start_us(&self) -> u64 {
        self.start_us.load(Ordering::Relaxed)
    }

    /// Total frame time, set when the next frame begins.
    pub fn duration_us(&self) -> u64 {
        self.duration_us.load(Ordering::Relaxed)
    }

    /// Number of records stored.
    pub fn len(&self) -> usize {
        (self.count.load(Ordering::Relaxed) as usize).min(self.records.len())
    }

    /// Whether the frame holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = ZoneRecord> + '_ {
        self.records[..self.len()]
            .iter()
            .map(|bits| ZoneRecord::unpack(bits.load(Ordering::Relaxed)))
    }

    fn reset(&self, sequence: u64, now_us: u64) {
        self.count.store(0, Ordering::Relaxed);
        self.duration_us.store(0, Ordering::Relaxed);
        self.start_us.store(now_us, Ordering::Relaxed);
        self.sequence.store(sequence, Ordering::Relaxed);
    }

    fn push(&self, record: ZoneRecord) -> bool {
        let cap = u32::try_from(self.records.len()).unwrap_or(u32::MAX);
        match self
            .count
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| (n < cap).then_some(n + 1))
        {
            Ok(index) => {
                self.records[index as usize].store(record.pack(), Ordering::Relaxed);
                true
            }
            Err(_) => false,
        }
    }
}

/// Circular buffer of frame slots with one published write head.
pub struct FrameRing {
    slots: Box<[FrameSlot]>,
    head: AtomicUsize,
    writer: OnceLock<ThreadId>,
    foreign_writer_reported: AtomicBool,
}

impl FrameRing {
    /// Create a ring of `capacity` slots holding up to `max_zones` records each.
    pub fn new(capacity: usize, max_zones: usize) -> Self {
        debug_assert!(capacity >= 2, "ring needs an active and a completed slot");
        Self {
            slots: (0..capacity).map(|_| FrameSlot::new(max_zones)).collect(),
            head: AtomicUsize::new(0),
            writer: OnceLock::new(),
            foreign_writer_reported: AtomicBool::new(false),
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Close the active frame and open the next one at `now_us`.
    ///
    /// Must only be called from one thread. Returns the new frame's sequence.
    pub fn begin_frame(&self, now_us: u64) -> u64 {
        self.check_writer();

        let prev = self.head.load(Ordering::Relaxed);
        let prev_slot = &self.slots[prev];
        let prev_sequence = prev_slot.sequence();
        if prev_sequence != 0 {
            let elapsed = now_us.saturating_sub(prev_slot.start_us());
            prev_slot.duration_us.store(elapsed, Ordering::Relaxed);
        }

        let next = (prev + 1) % self.slots.len();
        let sequence = prev_sequence + 1;
        self.slots[next].reset(sequence, now_us);

        self.head.store(next, Ordering::Release);
        sequence
    }

    /// Append to the active frame. Returns `false` when the frame is full.
    ///
    /// The head is read relaxed: recording happens on the writer thread or
    /// under the caller's own ordering with it.
    #[inline]
    pub fn record(&self, record: ZoneRecord) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        self.slots[head].push(record)
    }

    /// Sequence of the frame currently being written (0 before the first frame).
    pub fn active_sequence(&self) -> u64 {
        let head = self.head.load(Ordering::Acquire);
        self.slots[head].sequence()
    }

    /// Completed frames, newest first. Never yields the active slot.
    pub fn completed(&self) -> CompletedFrames<'_> {
        let head = self.head.load(Ordering::Acquire);
        let head_sequence = self.slots[head].sequence();
        CompletedFrames {
            ring: self,
            head,
            head_sequence,
            step: 1,
            expected: head_sequence.checked_sub(1),
        }
    }

    fn check_writer(&self) {
        let me = thread::current().id();
        let owner = *self.writer.get_or_init(|| me);
        if owner != me && !self.foreign_writer_reported.swap(true, Ordering::Relaxed) {
            diagnostics::emit(&diagnostics::ZP201);
        }
    }
}

/// Backward walk over completed frames.
pub struct CompletedFrames<'a> {
    ring: &'a FrameRing,
    head: usize,
    head_sequence: u64,
    step: usize,
    /// Sequence the next slot must carry; `None` once the walk is over.
    expected: Option<u64>,
}

impl CompletedFrames<'_> {
    /// Sequence of the active frame when the walk started.
    pub fn head_sequence(&self) -> u64 {
        self.head_sequence
    }
}

impl<'a> Iterator for CompletedFrames<'a> {
    type Item = &'a FrameSlot;

    fn next(&mut self) -> Option<Self::Item> {
        let expected = self.expected.filter(|&seq| seq != 0)?;
        let cap = self.ring.slots.len();
        if self.step >= cap {
            self.expected = None;
            return None;
        }

        let index = (self.head + cap - self.step) % cap;
        let slot = &self.ring.slots[index];
        // A mismatch means the slot was never written or the writer lapped us.
        if slot.sequence() != expected {
            self.expected = None;
            return None;
        }

        self.step += 1;
        self.expected = Some(expected - 1);
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(zone: u16, depth: u16, duration_us: u32) -> ZoneRecord {
        ZoneRecord {
            zone: ZoneId(zone),
            depth,
            duration_us,
        }
    }

    #[test]
    fn test_record_packing() {
        let r = rec(513, 7, u32::MAX);
        assert_eq!(ZoneRecord::unpack(r.pack()), r);
    }

    #[test]
    fn test_empty_ring_has_no_completed_frames() {
        let ring = FrameRing::new(4, 8);
        assert_eq!(ring.completed().count(), 0);

        ring.begin_frame(100);
        assert_eq!(ring.active_sequence(), 1);
        assert_eq!(ring.completed().count(), 0);
    }

    #[test]
    fn test_begin_frame_finalizes_previous_duration() {
        let ring = FrameRing::new(4, 8);
        ring.begin_frame(1_000);
        ring.begin_frame(17_000);

        let frames: Vec<_> = ring.completed().collect();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].sequence(), 1);
        assert_eq!(frames[0].start_us(), 1_000);
        assert_eq!(frames[0].duration_us(), 16_000);
    }

    #[test]
    fn test_walk_is_bounded_by_capacity_minus_one() {
        let ring = FrameRing::new(5, 8);
        for i in 0..23 {
            ring.begin_frame(i * 10);
        }

        let seqs: Vec<u64> = ring.completed().map(|f| f.sequence()).collect();
        assert_eq!(seqs, vec![22, 21, 20, 19]);
    }

    #[test]
    fn test_overflow_drops_extra_records() {
        let ring = FrameRing::new(3, 2);
        ring.begin_frame(0);
        assert!(ring.record(rec(0, 0, 10)));
        assert!(ring.record(rec(1, 1, 20)));
        assert!(!ring.record(rec(2, 0, 30)));
        ring.begin_frame(100);

        let frame = ring.completed().next().unwrap();
        assert_eq!(frame.len(), 2);
        let records: Vec<_> = frame.records().collect();
        assert_eq!(records, vec![rec(0, 0, 10), rec(1, 1, 20)]);
    }

    #[test]
    fn test_walk_keeps_the_head_it_started_from() {
        let ring = FrameRing::new(4, 4);
        ring.begin_frame(0);
        ring.begin_frame(10);

        let walk = ring.completed();
        ring.begin_frame(20);
        assert_eq!(walk.head_sequence(), 2);
        assert_eq!(ring.active_sequence(), 3);

        let seqs: Vec<u64> = walk.map(|f| f.sequence()).collect();
        assert_eq!(seqs, vec![1]);
    }

    #[test]
    fn test_slot_is_cleared_on_reuse() {
        let ring = FrameRing::new(2, 4);
        ring.begin_frame(0);
        ring.record(rec(0, 0, 5));
        ring.begin_frame(10);
        ring.begin_frame(20);
        ring.begin_frame(30);

        let frame = ring.completed().next().unwrap();
        assert_eq!(frame.sequence(), 3);
        assert!(frame.is_empty());
    }
}
