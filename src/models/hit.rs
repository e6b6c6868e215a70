use super::{Point, Region};

/// The output of one decode primitive invocation on one region
///
/// Corner points, when present, are in region-local coordinates of the buffer
/// the primitive actually saw (i.e. after any resampling). The aggregator
/// maps them back into source-frame coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Decoded content
    pub text: String,
    /// Corner points in region-local coordinates, if the primitive reports geometry
    pub corners: Option<[Point; 4]>,
    /// Detection confidence (0.0 - 1.0), if the primitive reports one
    pub confidence: Option<f32>,
}

impl Decoded {
    /// Create a decoded payload with no geometry or confidence
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            corners: None,
            confidence: None,
        }
    }
}

/// A raw, unfiltered decode result from one region of one frame
///
/// Raw hits exist only within a single detection pass; the aggregator consumes
/// them immediately. The same physical code may legitimately produce a hit
/// from several overlapping regions; resolving that is the aggregator's job,
/// not the decoder's.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHit {
    /// The region the decode primitive was run on
    pub region: Region,
    /// What the primitive decoded there
    pub decoded: Decoded,
}
