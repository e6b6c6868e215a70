//! Scanning session: cadence, lifecycle and result delivery
//!
//! A [`ScanSession`] is constructed fresh per session (camera-start to
//! camera-stop). It owns the aggregator, the cadence gate and the
//! pass-in-flight guard; nothing else mutates them. Camera frame rates vastly
//! exceed what multi-region decoding can sustain, so frames arriving before
//! the cadence interval elapses are dropped, never queued.

use crate::aggregator::Aggregator;
use crate::config::ScanConfig;
use crate::decoder::decode_regions;
use crate::models::{DetectionResult, Frame};
use crate::primitive::DecodePrimitive;
use crate::regions::region_plan;
use crate::source::{FrameSource, SourceError};
use log::{debug, trace};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Minimum wall-clock spacing between detection passes
///
/// The gate takes explicit timestamps so cadence decisions are testable
/// without sleeping; [`ScanSession::submit_frame`] feeds it `Instant::now()`.
pub struct CadenceGate {
    interval: Duration,
    last: Option<Instant>,
}

impl CadenceGate {
    /// Create a gate enforcing the given minimum interval
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Whether a pass may run at `now`
    ///
    /// Fires immediately on the first call, then at most once per interval.
    /// A firing call records `now` as the new reference point.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// Why a submitted frame was not scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The cadence interval since the last pass has not elapsed
    Cadence,
    /// Another pass on this session is still running
    PassInFlight,
    /// The session was stopped; in-flight results are discarded
    Stopped,
    /// The auto-stop target was already reached
    SessionComplete,
}

/// Outcome of submitting one frame for detection
#[derive(Debug, PartialEq)]
pub enum PassOutcome {
    /// The frame was dropped without a detection pass
    Skipped(SkipReason),
    /// A pass ran but confirmed nothing new
    NoNewResults,
    /// A pass confirmed new results
    NewResults(Vec<DetectionResult>),
    /// This pass reached the auto-stop target; the session is complete
    Complete(Vec<DetectionResult>),
}

/// Cloneable handle for stopping a session from anywhere
///
/// Stopping is safe while a detection pass is in flight: the pass finishes
/// but its results are discarded rather than reported.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    stop: Arc<AtomicBool>,
}

impl SessionHandle {
    /// Request the session to stop
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested
    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

/// One scanning session over a decode primitive
///
/// # Example
/// ```
/// use multiqr::{Decoded, Frame, PassOutcome, ScanConfig, ScanSession};
///
/// let primitive = |_pixels: &[u8], _w: u32, _h: u32| -> Option<Decoded> { None };
/// let mut session = ScanSession::new(ScanConfig::default(), primitive);
///
/// let frame = Frame::new(64, 64, vec![0u8; 64 * 64 * 4]).unwrap();
/// assert_eq!(session.submit_frame(&frame), PassOutcome::NoNewResults);
/// ```
pub struct ScanSession<D: DecodePrimitive> {
    config: ScanConfig,
    primitive: D,
    aggregator: Aggregator,
    gate: CadenceGate,
    in_flight: bool,
    stop: Arc<AtomicBool>,
    complete_signalled: bool,
    on_new_results: Option<Box<dyn FnMut(&[DetectionResult])>>,
    on_session_complete: Option<Box<dyn FnMut()>>,
}

impl<D: DecodePrimitive> ScanSession<D> {
    /// Create a session with fresh dedup state
    pub fn new(config: ScanConfig, primitive: D) -> Self {
        let aggregator = Aggregator::new(config.duplicate_policy, config.max_results);
        let gate = CadenceGate::new(config.cadence());
        Self {
            config,
            primitive,
            aggregator,
            gate,
            in_flight: false,
            stop: Arc::new(AtomicBool::new(false)),
            complete_signalled: false,
            on_new_results: None,
            on_session_complete: None,
        }
    }

    /// Register a callback invoked once per pass that yields new results
    pub fn on_new_results(mut self, callback: impl FnMut(&[DetectionResult]) + 'static) -> Self {
        self.on_new_results = Some(Box::new(callback));
        self
    }

    /// Register a callback fired once when the auto-stop target is reached
    pub fn on_session_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_session_complete = Some(Box::new(callback));
        self
    }

    /// A handle for stopping this session, usable from other threads
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            stop: Arc::clone(&self.stop),
        }
    }

    /// Whether the auto-stop target has been reached
    pub fn is_complete(&self) -> bool {
        self.aggregator.is_complete()
    }

    /// Number of distinct results confirmed so far
    pub fn results_confirmed(&self) -> usize {
        self.aggregator.confirmed()
    }

    /// Submit a frame for detection, gated on the current wall clock
    pub fn submit_frame(&mut self, frame: &Frame) -> PassOutcome {
        self.submit_frame_at(frame, Instant::now())
    }

    /// Submit a frame with an explicit cadence timestamp
    ///
    /// Exists so cadence behavior can be exercised deterministically; normal
    /// callers use [`submit_frame`](Self::submit_frame).
    pub fn submit_frame_at(&mut self, frame: &Frame, now: Instant) -> PassOutcome {
        if self.stop.load(Ordering::SeqCst) {
            return PassOutcome::Skipped(SkipReason::Stopped);
        }
        if self.aggregator.is_complete() {
            return PassOutcome::Skipped(SkipReason::SessionComplete);
        }
        if self.in_flight {
            // A pass is still running; this cadence tick is skipped, the
            // frame is dropped.
            return PassOutcome::Skipped(SkipReason::PassInFlight);
        }
        if !self.gate.ready(now) {
            trace!("frame dropped: cadence interval not elapsed");
            return PassOutcome::Skipped(SkipReason::Cadence);
        }

        self.in_flight = true;
        let plan = region_plan(frame.width(), frame.height(), &self.config);
        let hits = decode_regions(frame, &plan, &self.primitive, self.config.parallel);
        trace!(
            "pass over {} region(s) produced {} raw hit(s)",
            plan.len(),
            hits.len()
        );
        let results = self.aggregator.aggregate(hits);
        self.in_flight = false;

        if self.stop.load(Ordering::SeqCst) {
            // Stopped while the pass was running: discard its results.
            debug!("session stopped mid-pass; discarding {} result(s)", results.len());
            return PassOutcome::Skipped(SkipReason::Stopped);
        }

        if !results.is_empty() {
            if let Some(callback) = &mut self.on_new_results {
                callback(&results);
            }
        }

        if self.aggregator.is_complete() {
            if !self.complete_signalled {
                self.complete_signalled = true;
                debug!("session complete after {} result(s)", self.aggregator.confirmed());
                if let Some(callback) = &mut self.on_session_complete {
                    callback();
                }
            }
            return PassOutcome::Complete(results);
        }

        if results.is_empty() {
            PassOutcome::NoNewResults
        } else {
            PassOutcome::NewResults(results)
        }
    }

    /// Drive the session over a frame source until it completes or is stopped
    ///
    /// Starts the source, polls [`FrameSource::current_frame`] between cadence
    /// ticks (an unready source is simply retried on the next tick), and stops
    /// the source on the way out, including when the caller's stop handle
    /// fires mid-session.
    ///
    /// # Returns
    /// `Err` only for the source's fatal start errors; retrying is caller
    /// policy.
    pub fn run<S: FrameSource>(&mut self, source: &mut S) -> Result<(), SourceError> {
        source.start()?;
        debug!("frame source started, cadence {}ms", self.config.cadence_ms);

        // Poll faster than the cadence so a source that becomes ready between
        // ticks is picked up promptly; the gate enforces the real pass rate.
        let poll = (self.config.cadence() / 4).max(Duration::from_millis(1));

        loop {
            if self.stop.load(Ordering::SeqCst) || self.aggregator.is_complete() {
                break;
            }
            match source.current_frame() {
                Some(frame) => match self.submit_frame(&frame) {
                    PassOutcome::Complete(_) => break,
                    PassOutcome::Skipped(SkipReason::Stopped) => break,
                    _ => {}
                },
                None => trace!("frame not ready"),
            }
            std::thread::sleep(poll);
        }

        source.stop();
        debug!("frame source stopped");
        Ok(())
    }
}
