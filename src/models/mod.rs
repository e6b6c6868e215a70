//! Core data structures for the scan pipeline
//!
//! - [`Frame`]: one RGBA capture snapshot
//! - [`Region`] / [`RegionKind`]: a sub-window of a frame with provenance
//! - [`Decoded`] / [`RawHit`]: per-region decode output, before dedup
//! - [`DetectionResult`]: a confirmed, deduplicated result

/// Confirmed detection results and their geometry
pub mod detection;
/// RGBA frame snapshot
pub mod frame;
/// Per-region decode output
pub mod hit;
/// 2D point
pub mod point;
/// Frame sub-windows and partition provenance
pub mod region;

pub use detection::{BoundingBox, CodeFormat, DetectionResult, DetectionSource};
pub use frame::Frame;
pub use hit::{Decoded, RawHit};
pub use point::Point;
pub use region::{Region, RegionKind};
