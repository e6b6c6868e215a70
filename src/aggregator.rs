//! Detection aggregator
//!
//! Turns one frame's raw hits into zero or more confirmed results. Owns the
//! only mutable session state: the map of previously-seen content and the
//! completion flag. A fresh aggregator is constructed per scanning session,
//! so teardown is just dropping the instance: nothing leaks into the next
//! session.

use crate::config::DuplicatePolicy;
use crate::models::{
    BoundingBox, CodeFormat, DetectionResult, DetectionSource, Point, RawHit, Region,
};
use chrono::{DateTime, Utc};
use log::{debug, trace};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Per-session merge, dedup and auto-stop state
pub struct Aggregator {
    policy: DuplicatePolicy,
    max_results: Option<usize>,
    /// Previously-seen content, mapped to its first-seen time. Recorded under
    /// every policy; used for filtering only under `Skip` and for marking
    /// under `Warn`.
    seen: HashMap<String, DateTime<Utc>>,
    confirmed: usize,
    complete: bool,
}

impl Aggregator {
    /// Create aggregation state for a new session
    pub fn new(policy: DuplicatePolicy, max_results: Option<usize>) -> Self {
        Self {
            policy,
            max_results,
            seen: HashMap::new(),
            confirmed: 0,
            complete: false,
        }
    }

    /// Whether the auto-stop target has been reached
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Number of distinct texts confirmed so far this session
    pub fn confirmed(&self) -> usize {
        self.confirmed
    }

    /// When a text was first confirmed this session, if ever
    pub fn first_seen(&self, text: &str) -> Option<DateTime<Utc>> {
        self.seen.get(text).copied()
    }

    /// Merge one frame's raw hits into newly-confirmed results
    ///
    /// Hits must arrive in plan scan order: the first region to decode a given
    /// text wins the within-frame tie and supplies the reported geometry.
    ///
    /// # Returns
    /// The results to report for this pass, possibly empty. Once the session
    /// is complete, always empty.
    pub fn aggregate(&mut self, hits: Vec<RawHit>) -> Vec<DetectionResult> {
        if self.complete {
            return Vec::new();
        }

        let mut results = Vec::new();
        let mut frame_seen: HashSet<String> = HashSet::new();

        for hit in hits {
            let text = hit.decoded.text.trim();
            if text.is_empty() {
                // Whitespace content is never a meaningful scan result;
                // rejected rather than propagated.
                trace!("dropping hit with empty content from {:?}", hit.region.kind);
                continue;
            }

            // Within-frame dedup: first occurrence in scan order wins
            if !frame_seen.insert(text.to_string()) {
                continue;
            }

            let repeat = self.seen.contains_key(text);
            if repeat && self.policy == DuplicatePolicy::Skip {
                trace!("skipping repeat of previously-seen content");
                continue;
            }

            let now = Utc::now();
            self.seen.entry(text.to_string()).or_insert(now);
            if !repeat {
                self.confirmed += 1;
            }

            results.push(DetectionResult {
                id: Uuid::new_v4(),
                text: text.to_string(),
                format: CodeFormat::Qr,
                timestamp: now,
                confidence: hit.decoded.confidence,
                bounds: hit
                    .decoded
                    .corners
                    .map(|corners| frame_bounds(&hit.region, &corners)),
                source: DetectionSource::Camera,
                duplicate: repeat && self.policy == DuplicatePolicy::Warn,
            });

            if let Some(max) = self.max_results {
                if self.confirmed >= max {
                    debug!("auto-stop target of {max} distinct results reached");
                    self.complete = true;
                    break;
                }
            }
        }

        if !results.is_empty() {
            debug!("pass confirmed {} result(s)", results.len());
        }
        results
    }
}

/// Map region-local corner points back into a source-frame bounding box
///
/// Corners are in the coordinates of the buffer the primitive saw, i.e. after
/// any resampling, so each coordinate is divided by the region's scale before
/// the region origin is added.
fn frame_bounds(region: &Region, corners: &[Point; 4]) -> BoundingBox {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for corner in corners {
        let x = region.x as f32 + corner.x / region.scale;
        let y = region.y as f32 + corner.y / region.scale;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    BoundingBox {
        x: min_x.max(0.0),
        y: min_y.max(0.0),
        width: (max_x - min_x).max(0.0),
        height: (max_y - min_y).max(0.0),
    }
}
