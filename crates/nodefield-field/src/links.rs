//! Proximity links between particles.

/// Distance under which two particles are linked, in pixels.
pub const DEFAULT_LINK_DISTANCE: f64 = 120.0;

/// Opacity of the link between two particles `distance` apart.
///
/// Falls linearly from 1.0 at distance 0 to 0.0 at `max_distance`. Returns
/// `None` when the pair is not linked (`distance >= max_distance`).
pub fn link_opacity(distance: f64, max_distance: f64) -> Option<f64> {
    if distance < max_distance {
        Some(1.0 - distance / max_distance)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_endpoints() {
        assert_eq!(link_opacity(0.0, DEFAULT_LINK_DISTANCE), Some(1.0));
        assert_eq!(link_opacity(60.0, DEFAULT_LINK_DISTANCE), Some(0.5));
        assert_eq!(link_opacity(120.0, DEFAULT_LINK_DISTANCE), None);
        assert_eq!(link_opacity(500.0, DEFAULT_LINK_DISTANCE), None);
    }

    #[test]
    fn test_opacity_just_inside_range() {
        let opacity = link_opacity(119.9, DEFAULT_LINK_DISTANCE).unwrap();
        assert!(opacity > 0.0 && opacity < 0.001);
    }

    #[test]
    fn test_custom_link_distance() {
        assert_eq!(link_opacity(20.0, 40.0), Some(0.5));
        assert_eq!(link_opacity(40.0, 40.0), None);
    }
}
