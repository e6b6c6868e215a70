use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Axis-aligned bounding box in source-frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Box width
    pub width: f32,
    /// Box height
    pub height: f32,
}

/// Symbology of a confirmed detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CodeFormat {
    /// QR code
    Qr,
}

/// Where a detection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DetectionSource {
    /// Live camera capture
    Camera,
}

/// A confirmed, deduplicated scan result surfaced to the application
///
/// Under the default `Skip` duplicate policy, no two results in one session
/// ever carry identical text. Under `Warn`, repeats are reported with
/// `duplicate` set so the display layer can flag them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Unique identifier for this result
    pub id: Uuid,
    /// Decoded content
    pub text: String,
    /// Symbology tag
    pub format: CodeFormat,
    /// When the result was confirmed
    pub timestamp: DateTime<Utc>,
    /// Detection confidence (0.0 - 1.0), when the primitive reports one
    pub confidence: Option<f32>,
    /// Bounding box in source-frame coordinates, when geometry was reported
    pub bounds: Option<BoundingBox>,
    /// Capture provenance
    pub source: DetectionSource,
    /// True when this text was already seen this session (only set under the
    /// `Warn` duplicate policy)
    pub duplicate: bool,
}
