//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec2` / `Vec3` inputs, making them straightforward to
//! unit-test.

use bevy::prelude::{Vec2, Vec3};
use hexx::Hex;

/// `√3` as an `f32` (`std::f32::consts::SQRT_3` is not stable).
pub const SQRT_3: f32 = 1.732_050_8;

/// Maps an axial coordinate to its centre on the ground plane.
///
/// Returns `(x, z)` packed in a `Vec2`:
/// `x = size · (√3·q + √3/2·r)`, `z = size · 3/2·r`.
/// Axial neighbours end up `√3 · size` apart, i.e. `size` is the hexagon's
/// circumradius. Total over every integer pair.
///
/// # Examples
/// ```
/// # use hex_tile_editor::math::to_plane;
/// # use hexx::Hex;
/// let p = to_plane(Hex::new(0, 1), 1.0);
/// assert!((p.x - 3f32.sqrt() / 2.0).abs() < 1e-6);
/// assert!((p.y - 1.5).abs() < 1e-6);
/// ```
pub fn to_plane(hex: Hex, cell_size: f32) -> Vec2 {
    let q = hex.x as f32;
    let r = hex.y as f32;
    Vec2::new(
        cell_size * (SQRT_3 * q + SQRT_3 / 2.0 * r),
        cell_size * 1.5 * r,
    )
}

/// Lifts [`to_plane`] into 3D with `y` as the vertical offset.
pub fn to_world(hex: Hex, cell_size: f32, y: f32) -> Vec3 {
    let p = to_plane(hex, cell_size);
    Vec3::new(p.x, y, p.y)
}

/// Cubic ease-out curve: fast start, gentle deceleration.
///
/// `t` should be in `[0, 1]`. Returns `1 - (1 - t)^3`.
///
/// Drives the entry/exit tweens of placed tiles.
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Fraction of a tween completed after `elapsed` seconds, clamped to `[0, 1]`.
///
/// A non-positive `duration` counts as already finished.
pub fn tween_progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── to_plane ────────────────────────────────────────────────────

    #[test]
    fn origin_maps_to_origin() {
        assert_eq!(to_plane(Hex::ZERO, 1.0), Vec2::ZERO);
        assert_eq!(to_plane(Hex::ZERO, 7.5), Vec2::ZERO);
    }

    #[test]
    fn unit_q_maps_to_sqrt3_on_x() {
        let p = to_plane(Hex::new(1, 0), 1.0);
        assert!((p.x - 3f32.sqrt()).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn unit_r_maps_to_half_sqrt3_and_one_and_a_half() {
        let p = to_plane(Hex::new(0, 1), 1.0);
        assert!((p.x - 3f32.sqrt() / 2.0).abs() < 1e-6);
        assert!((p.y - 1.5).abs() < 1e-6);
    }

    #[test]
    fn scales_linearly_with_cell_size() {
        let hex = Hex::new(-2, 3);
        let unit = to_plane(hex, 1.0);
        let big = to_plane(hex, 1.1);
        assert!((big - unit * 1.1).length() < 1e-5);
    }

    #[test]
    fn all_neighbours_are_equidistant() {
        let size = 2.0;
        let center = to_plane(Hex::new(3, -1), size);
        for neighbor in Hex::new(3, -1).all_neighbors() {
            let d = center.distance(to_plane(neighbor, size));
            assert!(
                (d - SQRT_3 * size).abs() < 1e-4,
                "neighbour {neighbor:?} at distance {d}"
            );
        }
    }

    #[test]
    fn to_world_places_plane_z_on_world_z() {
        let w = to_world(Hex::new(0, 2), 1.0, 0.01);
        assert!((w.x - SQRT_3).abs() < 1e-5);
        assert!((w.y - 0.01).abs() < 1e-6);
        assert!((w.z - 3.0).abs() < 1e-5);
    }

    // ── ease_out_cubic ──────────────────────────────────────────────

    #[test]
    fn ease_at_zero_is_zero() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
    }

    #[test]
    fn ease_at_one_is_one() {
        assert_eq!(ease_out_cubic(1.0), 1.0);
    }

    #[test]
    fn ease_at_half_is_above_half() {
        // Ease-out should be ahead of linear at the midpoint.
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn ease_is_monotonically_increasing() {
        let steps: Vec<f32> = (0..=100)
            .map(|i| ease_out_cubic(i as f32 / 100.0))
            .collect();
        for w in steps.windows(2) {
            assert!(w[1] >= w[0], "ease_out_cubic must be non-decreasing");
        }
    }

    // ── tween_progress ──────────────────────────────────────────────

    #[test]
    fn progress_is_linear_inside_duration() {
        assert!((tween_progress(0.1, 0.4) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn progress_clamps_past_the_end() {
        assert_eq!(tween_progress(3.0, 0.4), 1.0);
        assert_eq!(tween_progress(-1.0, 0.4), 0.0);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        assert_eq!(tween_progress(0.0, 0.0), 1.0);
    }
}
