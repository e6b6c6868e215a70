//! multiqr - Multi-region QR/barcode scan core
//!
//! Given a single video frame, run a caller-supplied decode primitive over
//! the whole frame and over several overlapping sub-regions (halves,
//! quadrants, an optional grid, optional multi-scale resamples), merge the
//! per-region hits, drop duplicates by decoded content, and report only
//! genuinely new codes, all while enforcing a frame-processing cadence so the
//! camera loop never stalls.
//!
//! The crate deliberately owns none of the endpoints: the camera is behind
//! the [`FrameSource`] trait, the actual QR/barcode decoding is behind the
//! [`DecodePrimitive`] trait, and results flow back through callbacks or
//! return values. UI variants differ only in the [`ScanConfig`] they pass in.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Per-session merge, dedup and auto-stop logic
pub mod aggregator;
/// Configuration surface (region strategies, cadence, duplicate policy)
pub mod config;
/// Region decoder: crop, resample, fan out the decode primitive
pub mod decoder;
/// Core data structures (Frame, Region, RawHit, DetectionResult)
pub mod models;
/// The consumed single-region decode primitive
pub mod primitive;
/// Region partition plan derivation
pub mod regions;
/// Scanning session lifecycle, cadence gate and driver loop
pub mod session;
/// Frame source seam and its error taxonomy
pub mod source;

pub use aggregator::Aggregator;
pub use config::{DuplicatePolicy, MAX_GRID_SIZE, RegionStrategy, ScanConfig};
pub use decoder::decode_regions;
pub use models::{
    BoundingBox, CodeFormat, Decoded, DetectionResult, DetectionSource, Frame, Point, RawHit,
    Region, RegionKind,
};
pub use primitive::DecodePrimitive;
pub use regions::region_plan;
pub use session::{CadenceGate, PassOutcome, ScanSession, SessionHandle, SkipReason};
pub use source::{FrameSource, SourceError};

/// Scan one frame without session state
///
/// Builds the partition plan for the frame and runs the primitive over every
/// region. Returns the raw, un-deduplicated hits in scan order, useful for
/// one-shot scans of still images where no cross-frame state is wanted.
///
/// # Arguments
/// * `frame` - The RGBA frame to scan
/// * `config` - Partitioning policy (cadence and duplicate fields are ignored)
/// * `primitive` - The single-region decode capability
pub fn scan_frame<D>(frame: &Frame, config: &ScanConfig, primitive: &D) -> Vec<RawHit>
where
    D: DecodePrimitive,
{
    let plan = region_plan(frame.width(), frame.height(), config);
    decode_regions(frame, &plan, primitive, config.parallel)
}
