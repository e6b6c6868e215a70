//! The consumed single-region decode primitive
//!
//! The pipeline treats decoding one pixel buffer as a black-box capability
//! supplied by the caller (typically an external QR/barcode library). "No
//! code found" is a normal, frequent outcome, not an error. A primitive that
//! panics on malformed input is caught and treated the same way.

use crate::models::Decoded;
use log::trace;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Attempt to decode one barcode/QR from a single pixel buffer
///
/// Implementations must be pure with respect to the pipeline: the same buffer
/// may be decoded concurrently with other regions of the same frame when
/// parallel fan-out is enabled, so no shared mutable state.
pub trait DecodePrimitive: Sync {
    /// Decode one region's pixels
    ///
    /// # Arguments
    /// * `pixels` - Tightly packed RGBA bytes for this region only
    /// * `width` - Region buffer width in pixels
    /// * `height` - Region buffer height in pixels
    ///
    /// # Returns
    /// The decoded content (plus optional geometry/confidence), or `None`
    /// when no code is present.
    fn decode(&self, pixels: &[u8], width: u32, height: u32) -> Option<Decoded>;
}

impl<F> DecodePrimitive for F
where
    F: Fn(&[u8], u32, u32) -> Option<Decoded> + Sync,
{
    fn decode(&self, pixels: &[u8], width: u32, height: u32) -> Option<Decoded> {
        self(pixels, width, height)
    }
}

/// Run the primitive on one region, recovering from panics
///
/// A panic in the primitive (malformed crop data, library bug) must never
/// abort the remaining regions of the pass. It is downgraded to "no hit".
pub(crate) fn decode_guarded<D>(
    primitive: &D,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Option<Decoded>
where
    D: DecodePrimitive + ?Sized,
{
    match catch_unwind(AssertUnwindSafe(|| primitive.decode(pixels, width, height))) {
        Ok(decoded) => decoded,
        Err(_) => {
            trace!("decode primitive panicked on a {width}x{height} region; treated as no hit");
            None
        }
    }
}
