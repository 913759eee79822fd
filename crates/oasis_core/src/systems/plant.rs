use crate::config::PlantConfig;
use oasis_data::{PlantBody, Vec3};

/// Moves trunk and foliage a fraction of the way to their maximum scale.
///
/// `dt` is already time-scaled. The fraction is clamped to 1, so a huge
/// delta lands exactly on the maximum instead of overshooting it.
pub fn grow(body: &mut PlantBody, dt: f64, config: &PlantConfig) {
    let factor = (dt * config.growth_rate).clamp(0.0, 1.0);
    body.foliage_scale = body.foliage_scale.approach(config.foliage_max, factor);
    body.trunk_scale = body.trunk_scale.approach(config.trunk_max, factor);
    body.foliage_offset = Vec3::new(0.0, body.trunk_scale.y, 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seedling(config: &PlantConfig) -> PlantBody {
        PlantBody {
            trunk_scale: config.trunk_initial,
            foliage_scale: config.foliage_initial,
            foliage_offset: config.foliage_initial_offset,
        }
    }

    #[test]
    fn test_grow_moves_towards_max() {
        let config = PlantConfig::default();
        let mut body = seedling(&config);
        grow(&mut body, 1.0, &config);
        assert!(body.trunk_scale.y > config.trunk_initial.y);
        assert!(body.trunk_scale.y < config.trunk_max.y);
        assert_eq!(body.foliage_offset, Vec3::new(0.0, body.trunk_scale.y, 0.0));
    }

    #[test]
    fn test_grow_never_overshoots() {
        let config = PlantConfig::default();
        let mut body = seedling(&config);
        grow(&mut body, 1.0e9, &config);
        assert_eq!(body.trunk_scale, config.trunk_max);
        assert_eq!(body.foliage_scale, config.foliage_max);
        for _ in 0..10_000 {
            grow(&mut body, 50.0, &config);
            assert!(body.trunk_scale.y <= config.trunk_max.y);
            assert!(body.foliage_scale.y <= config.foliage_max.y);
        }
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let config = PlantConfig::default();
        let mut body = seedling(&config);
        grow(&mut body, 0.0, &config);
        assert_eq!(body.trunk_scale, config.trunk_initial);
    }
}
