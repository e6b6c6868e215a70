use serde::{Deserialize, Serialize};

/// Provenance tag identifying which partition of the frame a region came from
///
/// The variants also define the fixed scan order of a detection pass: full
/// frame first, then halves, quadrants, grid cells and finally the scaled
/// full-frame resamples. Within-frame tie-breaks between regions that decode
/// the same content follow this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegionKind {
    /// The whole frame at native resolution
    Full,
    /// Upper half of the frame
    HalfTop,
    /// Lower half of the frame
    HalfBottom,
    /// Left half of the frame
    HalfLeft,
    /// Right half of the frame
    HalfRight,
    /// One of the four equal quarter regions (row-major)
    Quadrant {
        /// Quadrant row, 0 or 1
        row: u8,
        /// Quadrant column, 0 or 1
        col: u8,
    },
    /// One cell of an N×N grid partition (row-major)
    Grid {
        /// Cell row, 0-based
        row: u8,
        /// Cell column, 0-based
        col: u8,
    },
    /// Full frame resampled by one of the configured scale factors
    Scaled {
        /// Index into the configured scale factor list
        index: u8,
    },
}

/// A rectangular sub-window of a frame, in source-frame pixel coordinates
///
/// Regions are derived deterministically from the frame dimensions every pass
/// and never persisted. `scale` is the resampling factor applied to the crop
/// before it is handed to the decode primitive (1.0 = no resampling).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Which partition produced this region
    pub kind: RegionKind,
    /// Left edge in source-frame pixels
    pub x: u32,
    /// Top edge in source-frame pixels
    pub y: u32,
    /// Width in source-frame pixels
    pub width: u32,
    /// Height in source-frame pixels
    pub height: u32,
    /// Resampling factor applied before decoding
    pub scale: f32,
}

impl Region {
    /// Create an unscaled region
    pub fn new(kind: RegionKind, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            kind,
            x,
            y,
            width,
            height,
            scale: 1.0,
        }
    }

    /// Create a full-frame region resampled by `scale`
    pub fn scaled(index: u8, width: u32, height: u32, scale: f32) -> Self {
        Self {
            kind: RegionKind::Scaled { index },
            x: 0,
            y: 0,
            width,
            height,
            scale,
        }
    }

    /// Dimensions of the pixel buffer actually handed to the decode primitive
    pub fn decoded_dimensions(&self) -> (u32, u32) {
        if (self.scale - 1.0).abs() < f32::EPSILON {
            (self.width, self.height)
        } else {
            let w = (self.width as f32 * self.scale).round().max(1.0) as u32;
            let h = (self.height as f32 * self.scale).round().max(1.0) as u32;
            (w, h)
        }
    }
}
