//! Region decoder
//!
//! Runs the decode primitive over every region of the partition plan. Each
//! region is extracted as its own independent pixel buffer (a crop, resampled
//! for scaled regions), so region decodes share no state and may be fanned
//! out across the rayon thread pool. Sequential evaluation is the baseline;
//! parallel execution changes timing only, never results or their order.
//!
//! No deduplication happens here. Overlapping regions finding the same code
//! is expected and left for the aggregator to resolve.

use crate::models::{Frame, RawHit, Region};
use crate::primitive::{DecodePrimitive, decode_guarded};
use image::{RgbaImage, imageops};
use log::trace;
use rayon::prelude::*;

/// Run the decode primitive over each region of the plan
///
/// # Arguments
/// * `frame` - The frame being scanned
/// * `plan` - Candidate regions in scan order (see [`crate::regions::region_plan`])
/// * `primitive` - The single-region decode capability
/// * `parallel` - Fan regions out across the rayon pool
///
/// # Returns
/// One [`RawHit`] per region that produced a non-empty decode, in plan order.
pub fn decode_regions<D>(frame: &Frame, plan: &[Region], primitive: &D, parallel: bool) -> Vec<RawHit>
where
    D: DecodePrimitive,
{
    if parallel {
        // par_iter + collect preserves plan order, which the aggregator's
        // tie-breaking depends on.
        plan.par_iter()
            .filter_map(|region| decode_one(frame, region, primitive))
            .collect()
    } else {
        plan.iter()
            .filter_map(|region| decode_one(frame, region, primitive))
            .collect()
    }
}

fn decode_one<D>(frame: &Frame, region: &Region, primitive: &D) -> Option<RawHit>
where
    D: DecodePrimitive,
{
    let decoded = if region.x == 0
        && region.y == 0
        && region.width == frame.width()
        && region.height == frame.height()
        && (region.scale - 1.0).abs() < f32::EPSILON
    {
        // Full unscaled frame: decode in place, no crop copy needed
        decode_guarded(primitive, frame.pixels(), frame.width(), frame.height())
    } else {
        let crop = crop_rgba(frame, region);
        let (width, height) = region.decoded_dimensions();
        if (region.scale - 1.0).abs() < f32::EPSILON {
            decode_guarded(primitive, &crop, region.width, region.height)
        } else {
            let resampled = resample_rgba(crop, region.width, region.height, width, height);
            decode_guarded(primitive, &resampled, width, height)
        }
    };

    match decoded {
        Some(decoded) => {
            trace!(
                "region {:?} decoded {} bytes of content",
                region.kind,
                decoded.text.len()
            );
            Some(RawHit {
                region: *region,
                decoded,
            })
        }
        None => None,
    }
}

/// Extract a region of the frame as its own tightly packed RGBA buffer
fn crop_rgba(frame: &Frame, region: &Region) -> Vec<u8> {
    let frame_w = frame.width() as usize;
    let pixels = frame.pixels();
    let x = region.x as usize;
    let w = region.width as usize;
    let h = region.height as usize;

    let mut crop = Vec::with_capacity(w * h * 4);
    for row in 0..h {
        let row_start = ((region.y as usize + row) * frame_w + x) * 4;
        crop.extend_from_slice(&pixels[row_start..row_start + w * 4]);
    }
    crop
}

/// Resample an RGBA crop to the target dimensions (Triangle filter)
fn resample_rgba(crop: Vec<u8>, src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Vec<u8> {
    let img = RgbaImage::from_raw(src_w, src_h, crop)
        .expect("crop buffer length matches region dimensions");
    imageops::resize(&img, dst_w, dst_h, imageops::FilterType::Triangle).into_raw()
}
