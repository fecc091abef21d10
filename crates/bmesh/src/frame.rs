//! Local frame construction and rotation helpers over `glam` vectors.
//!
//! A frame is `(bone_direction, local_y_axis, local_z_axis)`. The Y axis is
//! perpendicular to the bone, the Z axis completes a right-handed basis:
//!
//! ```text
//! local_y = normalize(world_up × direction)
//! local_z = normalize(local_y × direction)
//! ```
//!
//! `world_up` is +Y, or +X when the direction is (anti-)parallel to +Y.

use glam::{Quat, Vec3};

use crate::constants::DEGENERATE_LENGTH_SQ;

/// Build the perpendicular Y/Z axes for a bone direction.
///
/// Returns zero axes for a zero direction.
pub fn frame_from_direction(direction: Vec3) -> (Vec3, Vec3) {
  let Some(direction) = try_unit(direction) else {
    return (Vec3::ZERO, Vec3::ZERO);
  };
  let up_cross = Vec3::Y.cross(direction);
  let local_y = if up_cross.length_squared() <= DEGENERATE_LENGTH_SQ {
    Vec3::X.cross(direction)
  } else {
    up_cross
  }
  .normalize_or_zero();
  let local_z = local_y.cross(direction).normalize_or_zero();
  (local_y, local_z)
}

/// Rotate `v` by `angle` radians about `axis` (normalized by the caller).
#[inline]
pub fn rotate_about_axis(v: Vec3, angle: f32, axis: Vec3) -> Vec3 {
  Quat::from_axis_angle(axis, angle) * v
}

/// Direction halfway between `parent` and `child`.
///
/// Rotates `parent` towards `child` by half the angle between them, about
/// `parent × child`. Parallel inputs, or a `child` without direction, keep
/// `parent`. Anti-parallel inputs rotate about an arbitrary perpendicular.
pub fn bisect_direction(parent: Vec3, child: Vec3) -> Vec3 {
  let Some(child) = try_unit(child) else {
    return parent;
  };
  let Some(unit_parent) = try_unit(parent) else {
    return parent;
  };
  let cross = unit_parent.cross(child);
  let axis = if cross.length_squared() > DEGENERATE_LENGTH_SQ {
    cross.normalize()
  } else if unit_parent.dot(child) > 0.0 {
    return parent;
  } else {
    unit_parent.any_orthonormal_vector()
  };
  let angle = unit_parent.angle_between(child) * 0.5;
  rotate_about_axis(parent, angle, axis)
}

/// Normalize unless the vector is (near) zero or non-finite.
#[inline]
pub fn try_unit(v: Vec3) -> Option<Vec3> {
  if v.length_squared() <= DEGENERATE_LENGTH_SQ {
    return None;
  }
  v.try_normalize()
}

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;
