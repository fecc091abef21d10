use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::Vec3;

use super::*;
use crate::error::BMeshError;
use crate::test_utils::{assert_vec3_near, chain, single_bone, walk_chain};
use crate::types::Ball;

const EPS: f32 = 1e-4;

/// Every KEY ball of a straight chain ends up with the same direction.
#[test]
fn test_straight_chain_has_uniform_direction() {
  let points = [
    Vec3::new(0.0, 2.0, 0.0),
    Vec3::new(0.0, 4.0, 0.0),
    Vec3::new(0.0, 6.0, 0.0),
  ];
  let (mut mesh, keys) = chain(&points, 0.5);
  mesh.generate_inbetween_balls().unwrap();
  mesh.sweep().unwrap();

  let first = mesh.ball(keys[0]).unwrap().bone_direction;
  assert_vec3_near(first, Vec3::NEG_Y, EPS);
  for &key in &keys[1..] {
    assert_vec3_near(mesh.ball(key).unwrap().bone_direction, first, EPS);
  }
}

/// A right-angle joint points halfway between its two bones.
#[test]
fn test_joint_bisects_bend() {
  let points = [Vec3::new(0.0, 2.0, 0.0), Vec3::new(2.0, 2.0, 0.0)];
  let (mut mesh, keys) = chain(&points, 0.5);
  mesh.generate_inbetween_balls().unwrap();

  let path = walk_chain(&mesh, 0);
  let joint_at = path.iter().position(|&i| i == keys[0]).unwrap();
  let incoming = mesh.ball(path[joint_at - 1]).unwrap().bone_direction;
  let outgoing = mesh.ball(path[joint_at + 1]).unwrap().bone_direction;
  let theta = incoming.angle_between(outgoing);
  assert!((theta - FRAC_PI_2).abs() < EPS);

  mesh.sweep().unwrap();
  let joint = mesh.ball(keys[0]).unwrap();
  assert!((joint.bone_direction.angle_between(incoming) - theta * 0.5).abs() < EPS);
  assert!((joint.bone_direction.angle_between(outgoing) - theta * 0.5).abs() < EPS);
  assert!((joint.bone_direction.angle_between(incoming) - FRAC_PI_4).abs() < EPS);
}

/// The rebuilt joint frame is orthonormal around its new direction.
#[test]
fn test_joint_frame_rebuilt() {
  let points = [Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.5, 3.5, 1.0)];
  let (mut mesh, keys) = chain(&points, 0.5);
  mesh.generate_inbetween_balls().unwrap();
  mesh.sweep().unwrap();

  let joint = mesh.ball(keys[0]).unwrap();
  let d = joint.bone_direction.normalize();
  assert!(joint.local_y_axis.dot(d).abs() < EPS);
  assert!(joint.local_z_axis.dot(d).abs() < EPS);
  assert!((joint.local_y_axis.length() - 1.0).abs() < EPS);
  assert!((joint.local_z_axis.length() - 1.0).abs() < EPS);
}

/// A KEY leaf copies its parent's frame verbatim.
#[test]
fn test_leaf_inherits_parent_frame() {
  let (mut mesh, root, tip) = single_bone();
  mesh.generate_inbetween_balls().unwrap();
  mesh.sweep().unwrap();

  let path = walk_chain(&mesh, root);
  let parent = *mesh.ball(path[path.len() - 2]).unwrap();
  let leaf = mesh.ball(tip).unwrap();
  assert_eq!(leaf.bone_direction, parent.bone_direction);
  assert_eq!(leaf.local_y_axis, parent.local_y_axis);
  assert_eq!(leaf.local_z_axis, parent.local_z_axis);
}

/// INBETWEEN frames from subdivision survive the sweep.
#[test]
fn test_inbetween_frames_untouched() {
  let points = [Vec3::new(0.0, 2.0, 0.0), Vec3::new(2.0, 2.0, 0.0)];
  let (mut mesh, _) = chain(&points, 0.5);
  mesh.generate_inbetween_balls().unwrap();
  let before: Vec<_> = mesh
    .balls()
    .iter()
    .filter(|ball| ball.ball_type == BallType::Inbetween)
    .copied()
    .collect();

  mesh.sweep().unwrap();
  for ball in before {
    assert_eq!(mesh.ball(ball.index).unwrap(), &ball);
  }
}

#[test]
fn test_root_seeded_from_config() {
  let (mut mesh, root, _) = single_bone();
  mesh.generate_inbetween_balls().unwrap();
  mesh.sweep().unwrap();

  let root = mesh.ball(root).unwrap();
  assert_eq!(root.bone_direction, Vec3::Y);
  assert!(root.local_y_axis.dot(Vec3::Y).abs() < EPS);
}

/// A caller-provided root direction is left in place.
#[test]
fn test_caller_seeded_root_preserved() {
  let (mut mesh, root, _) = single_bone();
  mesh.ball_mut(root).unwrap().bone_direction = Vec3::X;
  mesh.generate_inbetween_balls().unwrap();
  mesh.sweep().unwrap();
  assert_eq!(mesh.ball(root).unwrap().bone_direction, Vec3::X);
}

/// KEY balls directly linked to the root still get a finite frame.
#[test]
fn test_key_next_to_root_is_finite() {
  let points = [Vec3::new(0.3, 0.0, 0.0), Vec3::new(0.3, 0.2, 0.0)];
  let (mut mesh, keys) = chain(&points, 0.5);
  mesh.generate_inbetween_balls().unwrap();
  mesh.sweep().unwrap();

  for key in keys {
    let ball = mesh.ball(key).unwrap();
    assert!(ball.bone_direction.is_finite());
    assert!(ball.local_y_axis.is_finite());
    assert!(ball.local_z_axis.is_finite());
  }
}

#[test]
fn test_sweep_requires_subdivision() {
  let (mut mesh, _, _) = single_bone();
  assert!(matches!(mesh.sweep(), Err(BMeshError::NotSubdivided { .. })));
}

#[test]
fn test_sweep_requires_root() {
  let mut mesh = BMesh::new();
  assert!(matches!(mesh.sweep(), Err(BMeshError::NoRootBall { .. })));
}

/// Bones added after subdivision still link both ways, so sweep refuses them
/// until the next pass.
#[test]
fn test_sweep_rejects_bone_added_after_subdivision() {
  let (mut mesh, _, tip) = single_bone();
  mesh.generate_inbetween_balls().unwrap();
  let extra = mesh.add_ball(Ball::key(Vec3::new(0.0, 3.0, 0.0), 0.5)).unwrap();
  mesh.add_bone(tip, extra).unwrap();

  assert!(matches!(mesh.sweep(), Err(BMeshError::NotSubdivided { .. })));
  assert!(matches!(mesh.stitch(), Err(BMeshError::NotSubdivided { .. })));

  mesh.generate_inbetween_balls().unwrap();
  mesh.sweep().unwrap();
  let leaf = mesh.ball(extra).unwrap();
  assert!(leaf.bone_direction.is_finite());
  assert!(leaf.bone_direction.length() > 0.5);
}
