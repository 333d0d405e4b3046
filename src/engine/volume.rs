use std::f64::consts::PI;

use crate::constants::{GALLONS_PER_CUBIC_FOOT, IRREGULAR_SHAPE_FACTOR};
use crate::types::{PoolShape, PoolSpecs, PoolType};

/// Pool volume in gallons. Above-ground pools have a uniform floor at the
/// wall height, and their footprint is effectively rectangular except for
/// round kits.
pub fn calculate_pool_volume(specs: &PoolSpecs) -> u32 {
    let volume = match specs.pool_type {
        PoolType::InGround => volume_at_depth(specs, specs.depth.average()),
        PoolType::AboveGround => match specs.shape {
            PoolShape::Round => {
                let radius = specs.length / 2.0;
                PI * radius * radius * specs.depth.deep * GALLONS_PER_CUBIC_FOOT
            }
            _ => specs.length * specs.width * specs.depth.deep * GALLONS_PER_CUBIC_FOOT,
        },
    };
    volume.round() as u32
}

fn volume_at_depth(specs: &PoolSpecs, depth: f64) -> f64 {
    match specs.shape {
        PoolShape::Rectangular => {
            specs.length * specs.width * depth * GALLONS_PER_CUBIC_FOOT
        }
        PoolShape::Oval => {
            (PI / 4.0) * specs.length * specs.width * depth * GALLONS_PER_CUBIC_FOOT
        }
        PoolShape::Round => {
            // Length doubles as the diameter for round pools.
            let radius = specs.length / 2.0;
            PI * radius * radius * depth * GALLONS_PER_CUBIC_FOOT
        }
        PoolShape::Kidney | PoolShape::Freeform => {
            specs.length * specs.width * depth * GALLONS_PER_CUBIC_FOOT * IRREGULAR_SHAPE_FACTOR
        }
    }
}

/// Water surface area in square feet, using the same footprint model as
/// the volume formula.
pub fn calculate_surface_area(specs: &PoolSpecs) -> u32 {
    let area = match specs.shape {
        PoolShape::Rectangular => specs.length * specs.width,
        PoolShape::Oval => (PI / 4.0) * specs.length * specs.width,
        PoolShape::Round => {
            let radius = specs.length / 2.0;
            PI * radius * radius
        }
        PoolShape::Kidney | PoolShape::Freeform => {
            specs.length * specs.width * IRREGULAR_SHAPE_FACTOR
        }
    };
    area.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DepthProfile;

    fn pool(length: f64, width: f64, shallow: f64, deep: f64, shape: PoolShape) -> PoolSpecs {
        PoolSpecs {
            length,
            width,
            depth: DepthProfile { shallow, deep },
            shape,
            pool_type: PoolType::InGround,
        }
    }

    #[test]
    fn rectangular_volume_is_exact() {
        // 30 x 15 at average depth 6: 30 * 15 * 6 * 7.5
        let specs = pool(30.0, 15.0, 4.0, 8.0, PoolShape::Rectangular);
        assert_eq!(calculate_pool_volume(&specs), 13_500);
    }

    #[test]
    fn freeform_is_85_percent_of_rectangular() {
        let rect = pool(30.0, 15.0, 4.0, 8.0, PoolShape::Rectangular);
        let free = pool(30.0, 15.0, 4.0, 8.0, PoolShape::Freeform);
        let kidney = pool(30.0, 15.0, 4.0, 8.0, PoolShape::Kidney);

        let expected = (13_500.0_f64 * 0.85).round() as u32;
        assert_eq!(calculate_pool_volume(&free), expected);
        assert_eq!(calculate_pool_volume(&kidney), expected);
    }

    #[test]
    fn oval_applies_quarter_pi() {
        let specs = pool(30.0, 15.0, 4.0, 8.0, PoolShape::Oval);
        let expected = (std::f64::consts::PI / 4.0 * 30.0 * 15.0 * 6.0 * 7.5).round() as u32;
        assert_eq!(calculate_pool_volume(&specs), expected);
    }

    #[test]
    fn round_above_ground_uses_deep_depth() {
        let mut specs = pool(20.0, 20.0, 4.0, 4.0, PoolShape::Round);
        specs.pool_type = PoolType::AboveGround;
        let volume = calculate_pool_volume(&specs);
        // pi * 10^2 * 4 * 7.5
        assert!((9_424..=9_425).contains(&volume));
    }

    #[test]
    fn above_ground_ignores_shallow_end() {
        let mut deep_sloped = pool(24.0, 12.0, 3.0, 5.0, PoolShape::Rectangular);
        deep_sloped.pool_type = PoolType::AboveGround;
        let mut uniform = pool(24.0, 12.0, 5.0, 5.0, PoolShape::Rectangular);
        uniform.pool_type = PoolType::AboveGround;
        assert_eq!(
            calculate_pool_volume(&deep_sloped),
            calculate_pool_volume(&uniform)
        );
    }

    #[test]
    fn above_ground_footprint_is_rectangular_except_round() {
        let mut oval = pool(24.0, 12.0, 4.0, 4.0, PoolShape::Oval);
        oval.pool_type = PoolType::AboveGround;
        let mut rect = pool(24.0, 12.0, 4.0, 4.0, PoolShape::Rectangular);
        rect.pool_type = PoolType::AboveGround;
        assert_eq!(calculate_pool_volume(&oval), calculate_pool_volume(&rect));
    }

    #[test]
    fn volume_grows_with_each_dimension() {
        let base = pool(30.0, 15.0, 4.0, 8.0, PoolShape::Rectangular);
        let longer = pool(31.0, 15.0, 4.0, 8.0, PoolShape::Rectangular);
        let wider = pool(30.0, 16.0, 4.0, 8.0, PoolShape::Rectangular);
        let deeper = pool(30.0, 15.0, 4.0, 9.0, PoolShape::Rectangular);

        let v = calculate_pool_volume(&base);
        assert!(calculate_pool_volume(&longer) > v);
        assert!(calculate_pool_volume(&wider) > v);
        assert!(calculate_pool_volume(&deeper) > v);
    }

    #[test]
    fn surface_area_matches_footprint() {
        let rect = pool(30.0, 15.0, 4.0, 8.0, PoolShape::Rectangular);
        assert_eq!(calculate_surface_area(&rect), 450);

        let round = pool(20.0, 20.0, 4.0, 4.0, PoolShape::Round);
        assert_eq!(calculate_surface_area(&round), 314);
    }
}
