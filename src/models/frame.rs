/// An immutable RGBA snapshot of one capture instant.
///
/// A frame is produced by a frame source once per capture tick, handed to the
/// region decoder for exactly one detection pass, and discarded afterwards.
/// The pixel buffer is tightly packed (no row stride padding): its length is
/// always `width * height * 4`.
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Create a frame from raw RGBA bytes
    ///
    /// # Arguments
    /// * `width` - Frame width in pixels (must be > 0)
    /// * `height` - Frame height in pixels (must be > 0)
    /// * `pixels` - Tightly packed RGBA bytes, 4 per pixel
    ///
    /// # Returns
    /// `None` if either dimension is zero or the buffer length does not match
    /// `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        if pixels.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Frame width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tightly packed RGBA bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
