//! Frame source seam
//!
//! The camera itself lives outside this crate. A [`FrameSource`] owns the
//! capture lifecycle and answers "give me the current frame" on demand; the
//! session loop polls it on cadence ticks. Hardware acquisition errors are
//! fatal to the session and surfaced to the caller at `start`;
//! the core never retries on its own.

use crate::models::Frame;
use thiserror::Error;

/// Unrecoverable frame source failures, raised at [`FrameSource::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SourceError {
    /// No capture device is present or it is in use elsewhere
    #[error("camera unavailable")]
    CameraUnavailable,
    /// The user or platform denied capture permission
    #[error("camera permission denied")]
    PermissionDenied,
    /// The requested capture constraints cannot be satisfied by the device
    #[error("capture constraints unsupported")]
    ConstraintsUnsupported,
}

/// A live, pull-based producer of frames
pub trait FrameSource {
    /// Acquire the capture device and begin producing frames
    ///
    /// This is the only operation expected to block meaningfully (hardware
    /// acquisition, permission grant).
    fn start(&mut self) -> Result<(), SourceError>;

    /// The most recent readable frame, if any
    ///
    /// Returns `None` while the device has not yet produced a usable frame
    /// (dimensions are zero until capture metadata loads). That is not an
    /// error; the caller simply retries on the next cadence tick.
    fn current_frame(&mut self) -> Option<Frame>;

    /// Release all underlying capture hardware
    ///
    /// Idempotent: safe to call multiple times, and safe to call while a
    /// detection pass is still running (that pass's results are discarded).
    fn stop(&mut self);
}
