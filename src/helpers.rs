//! Utility functions for hoopshot

use bevy::prelude::*;

/// Unit vector in the XZ plane from `from` toward `to`.
/// Falls back to `fallback` (flattened and normalized) when the points are
/// stacked vertically, and to +X if that is degenerate too.
pub fn planar_direction(from: Vec3, to: Vec3, fallback: Vec3) -> Vec3 {
    let flat = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    if let Some(dir) = flat.try_normalize() {
        return dir;
    }
    Vec3::new(fallback.x, 0.0, fallback.z)
        .try_normalize()
        .unwrap_or(Vec3::X)
}

/// Linear interpolation between `a` and `b`
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Format whole seconds as MM:SS
pub fn format_clock(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_direction_ignores_height() {
        let dir = planar_direction(Vec3::new(0.0, 0.45, 0.0), Vec3::new(3.0, 3.05, 4.0), Vec3::X);
        assert!((dir - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_planar_direction_fallback() {
        let below = Vec3::new(14.45, 0.45, 0.0);
        let dir = planar_direction(below, Vec3::new(14.45, 3.05, 0.0), Vec3::NEG_X);
        assert_eq!(dir, Vec3::NEG_X);
        assert_eq!(planar_direction(below, below, Vec3::Y), Vec3::X);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(0), "00:00");
    }
}
