// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Cosmetic per-file readiness ramp and the cancellable ticker that drives it.
//!
//! No bytes move while a ramp runs; the listing form uploads everything in
//! one request when it is submitted.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Sender, select};

use crate::models::media::FileId;

/// Interval between two ticks of one file's ramp.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
/// Exclusive upper bound of a single random step, in percent.
pub const MAX_STEP: f32 = 30.0;

/// Readiness of one admitted file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ProgressState {
    #[default]
    Pending,
    InProgress(f32),
    Complete,
}

impl ProgressState {
    pub fn percent(self) -> f32 {
        match self {
            Self::Pending => 0.0,
            Self::InProgress(p) => p,
            Self::Complete => 100.0,
        }
    }

    pub fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Apply one tick. Negative or non-finite steps count as zero; reaching
    /// 100 clamps to `Complete`, which never changes again.
    pub fn advance(self, step: f32) -> Self {
        if self.is_complete() {
            return self;
        }
        let step = if step.is_finite() { step.max(0.0) } else { 0.0 };
        let next = self.percent() + step;
        if next >= 100.0 {
            Self::Complete
        } else if next > 0.0 {
            Self::InProgress(next)
        } else {
            self
        }
    }
}

/// Owner side of a running ticker. Cancelling (or dropping) it stops the
/// ticker thread before its next tick.
pub struct TickHandle {
    cancelled: Arc<AtomicBool>,
    stop: Option<Sender<()>>,
}

impl TickHandle {
    /// A handle that is not attached to any thread.
    pub fn detached() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            stop: None,
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        // Dropping the sender disconnects the stop channel and wakes the ticker.
        self.stop.take();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub(crate) fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start a ticker thread for `id`. Every `interval` it calls `sink` with a
/// random step; it stops when the handle is cancelled or `sink` returns `false`.
pub fn spawn_ticker<F>(id: FileId, interval: Duration, sink: F) -> TickHandle
where
    F: Fn(FileId, f32) -> bool + Send + 'static,
{
    let cancelled = Arc::new(AtomicBool::new(false));
    let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(0);
    let flag = Arc::clone(&cancelled);

    let spawned = thread::Builder::new()
        .name(format!("ticker-{id}"))
        .spawn(move || {
            let ticker = crossbeam_channel::tick(interval);
            loop {
                select! {
                    recv(stop_rx) -> _ => break,
                    recv(ticker) -> _ => {
                        if flag.load(Ordering::SeqCst) || !sink(id, random_step()) {
                            break;
                        }
                    }
                }
            }
            tracing::trace!(%id, "progress ticker stopped");
        });

    if let Err(err) = spawned {
        tracing::warn!(%id, error = %err, "failed to start progress ticker");
    }

    TickHandle {
        cancelled,
        stop: Some(stop_tx),
    }
}

/// Random step in `[0, MAX_STEP)`, falling back to half the range when the
/// OS entropy source is unavailable.
pub fn random_step() -> f32 {
    let mut buf = [0u8; 2];
    match getrandom::fill(&mut buf) {
        Ok(()) => f32::from(u16::from_le_bytes(buf)) / (f32::from(u16::MAX) + 1.0) * MAX_STEP,
        Err(_) => MAX_STEP / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Instant;

    use crate::models::media::{MediaSelectionSet, RawFile};

    fn some_id() -> FileId {
        let mut set = MediaSelectionSet::default();
        let admission = set
            .add_files(vec![RawFile::from_bytes(
                "a.png",
                "image/png",
                Arc::from(vec![1u8]),
            )])
            .unwrap();
        admission.admitted[0]
    }

    #[test]
    fn advance_is_monotonic_and_clamps_at_complete() {
        let mut state = ProgressState::Pending;
        let mut last = state.percent();
        for step in [0.0, 12.5, 29.9, -4.0, f32::NAN, 25.0, 29.0, 29.0] {
            state = state.advance(step);
            assert!(state.percent() >= last);
            assert!(state.percent() <= 100.0);
            last = state.percent();
        }
        assert_eq!(state, ProgressState::Complete);
        assert_eq!(state.advance(10.0), ProgressState::Complete);
    }

    #[test]
    fn zero_step_keeps_pending() {
        assert_eq!(ProgressState::Pending.advance(0.0), ProgressState::Pending);
        assert_eq!(
            ProgressState::Pending.advance(5.0),
            ProgressState::InProgress(5.0)
        );
    }

    #[test]
    fn exact_hundred_completes() {
        assert_eq!(
            ProgressState::InProgress(70.0).advance(30.0),
            ProgressState::Complete
        );
    }

    #[test]
    fn random_step_stays_in_range() {
        for _ in 0..200 {
            let step = random_step();
            assert!((0.0..MAX_STEP).contains(&step), "step out of range: {step}");
        }
    }

    #[test]
    fn cancelling_handle_sets_flag() {
        let mut handle = TickHandle::detached();
        assert!(!handle.is_cancelled());
        handle.cancel();
        assert!(handle.is_cancelled());
    }

    #[test]
    fn dropping_handle_cancels() {
        let handle = TickHandle::detached();
        let flag = handle.cancel_flag();
        drop(handle);
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn ticker_delivers_ticks_until_cancelled() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let id = some_id();
        let mut handle = spawn_ticker(id, Duration::from_millis(5), move |id, step| {
            tx.send((id, step)).is_ok()
        });

        let (got_id, step) = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(got_id, id);
        assert!(step < MAX_STEP);

        handle.cancel();
        // Drain anything in flight, then make sure the ticker has gone quiet.
        let deadline = Instant::now() + Duration::from_millis(100);
        while Instant::now() < deadline {
            let _ = rx.recv_timeout(Duration::from_millis(10));
        }
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn ticker_stops_when_sink_refuses() {
        let calls = Arc::new(Mutex::new(0usize));
        let seen = Arc::clone(&calls);
        let _handle = spawn_ticker(some_id(), Duration::from_millis(2), move |_, _| {
            *seen.lock().unwrap() += 1;
            false
        });

        thread::sleep(Duration::from_millis(60));
        assert_eq!(*calls.lock().unwrap(), 1);
    }
}
