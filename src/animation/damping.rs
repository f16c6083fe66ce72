//! Frame-rate-independent approach-to-target helpers.
//!
//! Two flavors are used across the scene:
//!
//! - [`damp`] / [`damp_vec3`]: exponential decay toward a target with a time
//!   constant. Never overshoots and converges monotonically per axis. Drives
//!   the scalar tree-formation progress.
//! - [`lerp_toward`] / [`lerp_vec3_toward`]: a fixed per-second blend factor,
//!   clamped so a long frame lands exactly on the target. Drives per-entity
//!   position, scale, and color blends.

use glam::Vec3;

/// Exponential approach: `target + (current - target) * exp(-dt / tau)`.
///
/// A non-positive `time_constant` snaps to the target; a non-positive
/// `delta_time` leaves `current` untouched.
#[inline]
#[must_use]
pub fn damp(current: f32, target: f32, time_constant: f32, delta_time: f32) -> f32 {
    if time_constant <= 0.0 {
        return target;
    }
    if delta_time <= 0.0 || current == target {
        return current;
    }
    target + (current - target) * decay(time_constant, delta_time)
}

/// Per-axis [`damp`] for positions.
#[inline]
#[must_use]
pub fn damp_vec3(
    current: Vec3,
    target: Vec3,
    time_constant: f32,
    delta_time: f32,
) -> Vec3 {
    if time_constant <= 0.0 {
        return target;
    }
    if delta_time <= 0.0 || current == target {
        return current;
    }
    target + (current - target) * decay(time_constant, delta_time)
}

#[inline]
fn decay(time_constant: f32, delta_time: f32) -> f32 {
    (-delta_time / time_constant).exp()
}

/// Blend weight for one frame of a fixed-rate lerp: `min(1, factor * dt)`.
#[inline]
#[must_use]
pub fn lerp_weight(factor: f32, delta_time: f32) -> f32 {
    (factor * delta_time).clamp(0.0, 1.0)
}

/// `current + (target - current) * min(1, factor * dt)`.
#[inline]
#[must_use]
pub fn lerp_toward(current: f32, target: f32, factor: f32, delta_time: f32) -> f32 {
    current + (target - current) * lerp_weight(factor, delta_time)
}

/// Vector form of [`lerp_toward`].
#[inline]
#[must_use]
pub fn lerp_vec3_toward(
    current: Vec3,
    target: Vec3,
    factor: f32,
    delta_time: f32,
) -> Vec3 {
    current.lerp(target, lerp_weight(factor, delta_time))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damp_is_idempotent_at_target() {
        for &(tau, dt) in &[(1.5, 0.016), (0.1, 3.0), (10.0, 0.0), (0.0, 1.0)] {
            assert_eq!(damp(0.7, 0.7, tau, dt), 0.7);
            let v = Vec3::new(1.0, -2.0, 3.0);
            assert_eq!(damp_vec3(v, v, tau, dt), v);
        }
    }

    #[test]
    fn damp_converges_without_overshoot() {
        let mut x = 0.0_f32;
        let mut prev_gap = 1.0_f32;
        for _ in 0..500 {
            x = damp(x, 1.0, 1.5, 1.0 / 60.0);
            let gap = 1.0 - x;
            assert!(gap >= 0.0, "overshot: {x}");
            assert!(gap <= prev_gap);
            prev_gap = gap;
        }
        assert!(x > 0.99);
    }

    #[test]
    fn damp_vec3_monotone_per_axis() {
        let target = Vec3::new(5.0, -3.0, 0.5);
        let mut p = Vec3::new(-10.0, 10.0, 0.5);
        let mut prev = (p - target).abs();
        for _ in 0..200 {
            p = damp_vec3(p, target, 0.5, 0.05);
            let gap = (p - target).abs();
            assert!(gap.x <= prev.x && gap.y <= prev.y && gap.z <= prev.z);
            prev = gap;
        }
    }

    #[test]
    fn damp_is_frame_rate_independent() {
        let mut fine = 0.0;
        for _ in 0..60 {
            fine = damp(fine, 1.0, 1.5, 1.0 / 60.0);
        }
        let coarse = damp(0.0, 1.0, 1.5, 1.0);
        assert!((fine - coarse).abs() < 1e-4);
    }

    #[test]
    fn lerp_weight_clamps_long_frames() {
        assert_eq!(lerp_weight(0.8, 10.0), 1.0);
        assert_eq!(lerp_toward(0.0, 1.0, 0.8, 10.0), 1.0);
        assert!((lerp_toward(0.0, 1.0, 0.8, 0.5) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn lerp_vec3_reaches_target_monotonically() {
        let target = Vec3::new(0.0, 25.0, 0.0);
        let mut p = Vec3::new(22.0, 12.0, 0.0);
        let mut prev = p.distance(target);
        for _ in 0..900 {
            p = lerp_vec3_toward(p, target, 0.8, 1.0 / 60.0);
            let d = p.distance(target);
            assert!(d <= prev);
            prev = d;
        }
        assert!(prev < 0.01);
    }
}
