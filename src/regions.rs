//! Region partition plan
//!
//! Builds the fixed, deterministic set of candidate regions for one frame:
//! full frame, half splits, quadrants, optional N×N grid and optional
//! multi-scale full-frame resamples. The order of the returned plan is the
//! scan order of the pass, and the aggregator relies on it for tie-breaking,
//! so it must stay stable: full → halves → quadrants → grid → scaled.

use crate::config::{MAX_GRID_SIZE, RegionStrategy, ScanConfig};
use crate::models::{Region, RegionKind};

/// Build the candidate region list for a frame of the given dimensions
///
/// # Arguments
/// * `width` - Source frame width in pixels
/// * `height` - Source frame height in pixels
/// * `config` - Enabled strategies, grid size, scale factors, minimum size
///
/// # Returns
/// Regions in scan order. The full frame is always first, regardless of the
/// configured strategies. Regions smaller than `config.min_region_px` on
/// either side are omitted, since decoding them is wasted work.
pub fn region_plan(width: u32, height: u32, config: &ScanConfig) -> Vec<Region> {
    let mut plan = Vec::new();
    let min = config.min_region_px;

    // Full frame is always scanned: it catches large, centered codes and is
    // the cheapest way to handle the common single-code case.
    plan.push(Region::new(RegionKind::Full, 0, 0, width, height));

    if config.has_strategy(RegionStrategy::Halves) {
        let half_h = height / 2;
        let half_w = width / 2;
        push_usable(
            &mut plan,
            Region::new(RegionKind::HalfTop, 0, 0, width, half_h),
            min,
        );
        push_usable(
            &mut plan,
            Region::new(RegionKind::HalfBottom, 0, half_h, width, height - half_h),
            min,
        );
        push_usable(
            &mut plan,
            Region::new(RegionKind::HalfLeft, 0, 0, half_w, height),
            min,
        );
        push_usable(
            &mut plan,
            Region::new(RegionKind::HalfRight, half_w, 0, width - half_w, height),
            min,
        );
    }

    if config.has_strategy(RegionStrategy::Quadrants) {
        let half_w = width / 2;
        let half_h = height / 2;
        for row in 0..2u8 {
            for col in 0..2u8 {
                let x = if col == 0 { 0 } else { half_w };
                let y = if row == 0 { 0 } else { half_h };
                let w = if col == 0 { half_w } else { width - half_w };
                let h = if row == 0 { half_h } else { height - half_h };
                push_usable(
                    &mut plan,
                    Region::new(RegionKind::Quadrant { row, col }, x, y, w, h),
                    min,
                );
            }
        }
    }

    if config.has_strategy(RegionStrategy::Grid) {
        let n = config.grid_size.clamp(1, MAX_GRID_SIZE);
        let cell_w = width / n;
        let cell_h = height / n;
        for row in 0..n {
            for col in 0..n {
                let x = col * cell_w;
                let y = row * cell_h;
                // Last row/column absorb the division remainder
                let w = if col == n - 1 { width - x } else { cell_w };
                let h = if row == n - 1 { height - y } else { cell_h };
                push_usable(
                    &mut plan,
                    Region::new(
                        RegionKind::Grid {
                            row: row as u8,
                            col: col as u8,
                        },
                        x,
                        y,
                        w,
                        h,
                    ),
                    min,
                );
            }
        }
    }

    if config.has_strategy(RegionStrategy::MultiScale) {
        for (index, &scale) in config.scale_factors.iter().enumerate() {
            if scale <= 0.0 || (scale - 1.0).abs() < f32::EPSILON {
                // 1.0 duplicates the full-frame pass; non-positive is nonsense
                continue;
            }
            let region = Region::scaled(index as u8, width, height, scale);
            let (w, h) = region.decoded_dimensions();
            if w >= min && h >= min {
                plan.push(region);
            }
        }
    }

    plan
}

fn push_usable(plan: &mut Vec<Region>, region: Region, min: u32) {
    if region.width >= min && region.height >= min {
        plan.push(region);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(strategies: Vec<RegionStrategy>) -> ScanConfig {
        ScanConfig {
            strategies,
            ..ScanConfig::default()
        }
    }

    #[test]
    fn test_default_plan_order() {
        let plan = region_plan(640, 480, &ScanConfig::default());
        // full + 4 halves + 4 quadrants
        assert_eq!(plan.len(), 9);
        assert_eq!(plan[0].kind, RegionKind::Full);
        assert_eq!(plan[1].kind, RegionKind::HalfTop);
        assert_eq!(plan[2].kind, RegionKind::HalfBottom);
        assert_eq!(plan[3].kind, RegionKind::HalfLeft);
        assert_eq!(plan[4].kind, RegionKind::HalfRight);
        assert_eq!(plan[5].kind, RegionKind::Quadrant { row: 0, col: 0 });
        assert_eq!(plan[8].kind, RegionKind::Quadrant { row: 1, col: 1 });
    }

    #[test]
    fn test_plan_is_deterministic() {
        let config = ScanConfig {
            strategies: vec![
                RegionStrategy::Halves,
                RegionStrategy::Quadrants,
                RegionStrategy::Grid,
                RegionStrategy::MultiScale,
            ],
            ..ScanConfig::default()
        };
        assert_eq!(
            region_plan(1280, 720, &config),
            region_plan(1280, 720, &config)
        );
    }

    #[test]
    fn test_quadrants_tile_frame_exactly() {
        let plan = region_plan(641, 481, &config_with(vec![RegionStrategy::Quadrants]));
        let quads: Vec<&Region> = plan
            .iter()
            .filter(|r| matches!(r.kind, RegionKind::Quadrant { .. }))
            .collect();
        assert_eq!(quads.len(), 4);
        let area: u64 = quads
            .iter()
            .map(|r| r.width as u64 * r.height as u64)
            .sum();
        assert_eq!(area, 641 * 481);
    }

    #[test]
    fn test_grid_cells_cover_frame() {
        let config = ScanConfig {
            strategies: vec![RegionStrategy::Grid],
            grid_size: 3,
            ..ScanConfig::default()
        };
        let plan = region_plan(640, 480, &config);
        let cells: Vec<&Region> = plan
            .iter()
            .filter(|r| matches!(r.kind, RegionKind::Grid { .. }))
            .collect();
        assert_eq!(cells.len(), 9);
        let area: u64 = cells
            .iter()
            .map(|r| r.width as u64 * r.height as u64)
            .sum();
        assert_eq!(area, 640 * 480);
        // Last column absorbs the remainder of 640 / 3
        let last = cells
            .iter()
            .find(|r| r.kind == RegionKind::Grid { row: 0, col: 2 })
            .unwrap();
        assert_eq!(last.width, 640 - 2 * (640 / 3));
    }

    #[test]
    fn test_grid_size_is_capped() {
        let config = ScanConfig {
            strategies: vec![RegionStrategy::Grid],
            grid_size: 50,
            min_region_px: 1,
            ..ScanConfig::default()
        };
        let plan = region_plan(1000, 1000, &config);
        let cells = plan
            .iter()
            .filter(|r| matches!(r.kind, RegionKind::Grid { .. }))
            .count();
        assert_eq!(cells as u32, MAX_GRID_SIZE * MAX_GRID_SIZE);
    }

    #[test]
    fn test_undersized_regions_skipped() {
        // 80x80 frame: halves and quadrants fall below the 50px minimum
        let plan = region_plan(80, 80, &ScanConfig::default());
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].kind, RegionKind::Full);
    }

    #[test]
    fn test_multiscale_skips_identity_and_small() {
        let config = ScanConfig {
            strategies: vec![RegionStrategy::MultiScale],
            scale_factors: vec![0.5, 1.0, 1.5, 0.1],
            ..ScanConfig::default()
        };
        let plan = region_plan(200, 200, &config);
        let scaled: Vec<&Region> = plan
            .iter()
            .filter(|r| matches!(r.kind, RegionKind::Scaled { .. }))
            .collect();
        // 0.5 and 1.5 survive; 1.0 is identity, 0.1 yields a 20px buffer
        assert_eq!(scaled.len(), 2);
        assert_eq!(scaled[0].scale, 0.5);
        assert_eq!(scaled[1].scale, 1.5);
    }

    #[test]
    fn test_full_frame_always_present() {
        let plan = region_plan(640, 480, &config_with(vec![RegionStrategy::Grid]));
        assert_eq!(plan[0].kind, RegionKind::Full);
    }
}
