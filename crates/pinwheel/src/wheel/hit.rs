use super::{MIDDLE_CIRCLE_RADIUS, WHEEL_RADIUS};
use pinput::input::Point;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Everything the hit test needs besides the pointer itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitParams {
    /// Wheel center as a fraction of the screen.
    pub center: Point,
    pub scale: f64,
    /// Screen height / width.
    pub aspect: f64,
    pub sectors: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hit {
    pub over_wheel: bool,
    pub sector: Option<usize>,
}

impl Hit {
    pub const OUTSIDE: Self = Self {
        over_wheel: false,
        sector: None,
    };
}

/// Resolves which sector, if any, lies under a pointer given as a fraction
/// of the screen. Disabled sectors resolve to no sector.
pub fn hit_test(pointer: Point, params: &HitParams, is_enabled: impl Fn(usize) -> bool) -> Hit {
    if params.sectors == 0 {
        return Hit::OUTSIDE;
    }

    let x = pointer.x - params.center.x;
    // y is rescaled into width units so the regions are circles on screen
    let y = (pointer.y - params.center.y) * params.aspect;
    let dist_sq = x * x + y * y;
    if !dist_sq.is_finite() {
        return Hit::OUTSIDE;
    }

    let outer = params.scale * WHEEL_RADIUS;
    if dist_sq > outer * outer {
        return Hit::OUTSIDE;
    }

    let inner = params.scale * MIDDLE_CIRCLE_RADIUS;
    if dist_sq <= inner * inner {
        return Hit {
            over_wheel: true,
            sector: None,
        };
    }

    // atan2 is zero pointing right; shift so straight up is zero, clockwise
    let mut angle = y.atan2(x) + FRAC_PI_2;
    if angle < 0.0 {
        angle += TAU;
    }

    let sector = sector_at(angle, params.sectors);
    Hit {
        over_wheel: true,
        sector: is_enabled(sector).then_some(sector),
    }
}

/// Sector whose center is nearest to `angle` (radians clockwise from the
/// top, in `[0, 2π)`). Sector 0 is centered on the top.
pub fn sector_at(angle: f64, sectors: usize) -> usize {
    let width = TAU / sectors as f64;
    ((angle - width / 2.0) / width + 1.0).floor() as usize % sectors
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASPECT: f64 = 1080.0 / 1920.0;

    fn params(sectors: usize) -> HitParams {
        HitParams {
            center: Point::new(0.5, 0.5),
            scale: 1.0,
            aspect: ASPECT,
            sectors,
        }
    }

    /// Pixel position on a 1920x1080 screen, as a fraction.
    fn px(x: f64, y: f64) -> Point {
        Point::new(x / 1920.0, y / 1080.0)
    }

    /// `radius` pixels from the screen center at `degrees` clockwise from the top.
    fn polar(degrees: f64, radius: f64) -> Point {
        let rad = degrees.to_radians();
        px(960.0 + radius * rad.sin(), 540.0 - radius * rad.cos())
    }

    #[test]
    fn test_pointer_straight_up_hits_first_sector() {
        let hit = hit_test(px(960.0, 240.0), &params(6), |_| true);
        assert_eq!(
            hit,
            Hit {
                over_wheel: true,
                sector: Some(0)
            }
        );
    }

    #[test]
    fn test_disabled_sector_resolves_to_none() {
        let hit = hit_test(px(960.0, 240.0), &params(6), |i| i != 0);
        assert_eq!(
            hit,
            Hit {
                over_wheel: true,
                sector: None
            }
        );
    }

    #[test]
    fn test_sectors_run_clockwise_from_top() {
        for sectors in [4, 6, 8] {
            let step = 360.0 / sectors as f64;
            for i in 0..sectors {
                // a little off the sector center to avoid boundaries
                let hit = hit_test(polar(i as f64 * step + 3.0, 280.0), &params(sectors), |_| true);
                assert_eq!(hit.sector, Some(i), "sector {i} of {sectors}");
            }
        }
    }

    #[test]
    fn test_sector_rounds_to_nearest_center() {
        // just counter-clockwise of the top still belongs to sector 0
        let hit = hit_test(polar(350.0, 280.0), &params(6), |_| true);
        assert_eq!(hit.sector, Some(0));
        assert_eq!(sector_at(29.0f64.to_radians(), 6), 0);
        assert_eq!(sector_at(31.0f64.to_radians(), 6), 1);
        assert_eq!(sector_at(329.0f64.to_radians(), 6), 5);
        assert_eq!(sector_at(331.0f64.to_radians(), 6), 0);
    }

    #[test]
    fn test_dead_zone_is_over_wheel_without_sector() {
        // dead zone is 125px at scale 1 on a 1920 wide screen
        let hit = hit_test(px(960.0, 540.0 - 120.0), &params(6), |_| true);
        assert_eq!(
            hit,
            Hit {
                over_wheel: true,
                sector: None
            }
        );
        let hit = hit_test(px(960.0, 540.0 - 130.0), &params(6), |_| true);
        assert_eq!(hit.sector, Some(0));
    }

    #[test]
    fn test_outer_radius_boundary_is_stable() {
        // outer radius is exactly 435px; the boundary itself counts as inside
        let on_edge = px(960.0 + 435.0, 540.0);
        for _ in 0..100 {
            assert!(hit_test(on_edge, &params(6), |_| true).over_wheel);
        }
        let outside = px(960.0 + 435.5, 540.0);
        for _ in 0..100 {
            assert_eq!(hit_test(outside, &params(6), |_| true), Hit::OUTSIDE);
        }
    }

    #[test]
    fn test_aspect_correction_makes_regions_circular() {
        // 400px straight down is inside, even though as a raw screen fraction
        // the vertical offset is larger than the horizontal radius
        let hit = hit_test(px(960.0, 940.0), &params(6), |_| true);
        assert_eq!(hit.sector, Some(3));
        assert!(!hit_test(px(960.0, 540.0 + 440.0), &params(6), |_| true).over_wheel);
    }

    #[test]
    fn test_scale_grows_both_radii() {
        let mut scaled = params(6);
        scaled.scale = 0.5;
        // 200px up: in the ring at scale 1, outside at scale 0.5 (outer 217.5)
        assert!(hit_test(px(960.0, 340.0), &scaled, |_| true).over_wheel);
        assert_eq!(hit_test(px(960.0, 300.0), &scaled, |_| true), Hit::OUTSIDE);
        // 70px up: ring at scale 0.5 (inner 62.5), dead zone at scale 1
        assert_eq!(hit_test(px(960.0, 470.0), &scaled, |_| true).sector, Some(0));
        assert_eq!(hit_test(px(960.0, 470.0), &params(6), |_| true).sector, None);
    }

    #[test]
    fn test_non_finite_pointer_is_outside() {
        for pointer in [
            Point::new(f64::NAN, f64::NAN),
            Point::new(0.5, f64::NAN),
            Point::new(f64::INFINITY, 0.5),
            Point::new(f64::NEG_INFINITY, f64::INFINITY),
        ] {
            assert_eq!(hit_test(pointer, &params(6), |_| true), Hit::OUTSIDE, "{pointer:?}");
        }
    }

    #[test]
    fn test_identical_queries_are_idempotent() {
        let p = polar(123.0, 300.0);
        let first = hit_test(p, &params(6), |_| true);
        for _ in 0..10 {
            assert_eq!(hit_test(p, &params(6), |_| true), first);
        }
    }
}
