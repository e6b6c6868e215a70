//! Shared helpers for integration tests: synthetic frames carrying colored
//! marker blocks, a stub decode primitive that "decodes" those markers, and a
//! scripted frame source.

use multiqr::{Decoded, Frame, FrameSource, Point, SourceError};

/// Side length of a painted marker block, in pixels
pub const MARKER_PX: u32 = 8;

/// Route `log` output to the test harness; honors `RUST_LOG`
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Paint a white frame with one 8x8 marker block per entry
///
/// Each marker is identified by its red channel value; green and blue are
/// zero so the stub primitive can tell markers from the white background.
pub fn frame_with_markers(width: u32, height: u32, markers: &[(u32, u32, u8)]) -> Frame {
    let mut pixels = vec![255u8; width as usize * height as usize * 4];
    for &(mx, my, tag) in markers {
        for dy in 0..MARKER_PX {
            for dx in 0..MARKER_PX {
                let x = mx + dx;
                let y = my + dy;
                assert!(x < width && y < height, "marker out of bounds");
                let idx = (y as usize * width as usize + x as usize) * 4;
                pixels[idx] = tag;
                pixels[idx + 1] = 0;
                pixels[idx + 2] = 0;
            }
        }
    }
    Frame::new(width, height, pixels).unwrap()
}

/// A frame with no markers at all
pub fn blank_frame(width: u32, height: u32) -> Frame {
    frame_with_markers(width, height, &[])
}

/// Build a stub primitive that decodes the first marker block in a buffer
///
/// Scans row-major for the first marker pixel (green channel zero), looks its
/// red-channel tag up in `table`, and reports the marker's geometry as
/// region-local corner points. Returns `None` when the buffer holds no known
/// marker, like a real decoder seeing a codeless region.
pub fn marker_primitive(
    table: Vec<(u8, &'static str)>,
) -> impl Fn(&[u8], u32, u32) -> Option<Decoded> + Sync {
    move |pixels: &[u8], width: u32, _height: u32| {
        for (i, px) in pixels.chunks_exact(4).enumerate() {
            if px[1] != 0 {
                continue;
            }
            let text = table
                .iter()
                .find(|(tag, _)| *tag == px[0])
                .map(|(_, text)| *text)?;
            let x = (i as u32 % width) as f32;
            let y = (i as u32 / width) as f32;
            let side = MARKER_PX as f32;
            return Some(Decoded {
                text: text.to_string(),
                corners: Some([
                    Point::new(x, y),
                    Point::new(x + side, y),
                    Point::new(x + side, y + side),
                    Point::new(x, y + side),
                ]),
                confidence: Some(1.0),
            });
        }
        None
    }
}

/// A frame source that replays a fixed script of `current_frame` answers
///
/// Once the script is exhausted the last entry repeats forever, which mimics
/// a camera that keeps serving the same scene.
pub struct ScriptedSource {
    script: Vec<Option<Frame>>,
    cursor: usize,
    fail_start: Option<SourceError>,
    pub started: bool,
    pub stop_calls: usize,
}

impl ScriptedSource {
    pub fn new(script: Vec<Option<Frame>>) -> Self {
        Self {
            script,
            cursor: 0,
            fail_start: None,
            started: false,
            stop_calls: 0,
        }
    }

    pub fn failing(error: SourceError) -> Self {
        let mut source = Self::new(Vec::new());
        source.fail_start = Some(error);
        source
    }
}

impl FrameSource for ScriptedSource {
    fn start(&mut self) -> Result<(), SourceError> {
        if let Some(error) = self.fail_start {
            return Err(error);
        }
        self.started = true;
        Ok(())
    }

    fn current_frame(&mut self) -> Option<Frame> {
        if self.script.is_empty() {
            return None;
        }
        let index = self.cursor.min(self.script.len() - 1);
        self.cursor += 1;
        self.script[index].clone()
    }

    fn stop(&mut self) {
        self.stop_calls += 1;
    }
}
