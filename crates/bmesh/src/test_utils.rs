//! Skeleton fixtures shared by the unit tests.

use glam::Vec3;

use crate::mesh::BMesh;
use crate::types::Ball;

/// Root at the origin (radius 1.0) with one KEY ball at (0, 2, 0), radius 0.5.
pub fn single_bone() -> (BMesh, usize, usize) {
  let mut mesh = BMesh::new();
  let root = mesh.add_ball(Ball::root(Vec3::ZERO, 1.0)).unwrap();
  let tip = mesh.add_ball(Ball::key(Vec3::new(0.0, 2.0, 0.0), 0.5)).unwrap();
  mesh.add_bone(root, tip).unwrap();
  (mesh, root, tip)
}

/// Root followed by KEY balls at `points`, each joined to the previous one.
///
/// Returns the mesh and the KEY indices in chain order.
pub fn chain(points: &[Vec3], radius: f32) -> (BMesh, Vec<usize>) {
  let mut mesh = BMesh::new();
  let mut previous = mesh.add_ball(Ball::root(Vec3::ZERO, 1.0)).unwrap();
  let mut keys = Vec::with_capacity(points.len());
  for &point in points {
    let key = mesh.add_ball(Ball::key(point, radius)).unwrap();
    mesh.add_bone(previous, key).unwrap();
    keys.push(key);
    previous = key;
  }
  (mesh, keys)
}

/// Root at the origin with one KEY tip per direction, `length` away.
pub fn fan(directions: &[Vec3], length: f32) -> (BMesh, Vec<usize>) {
  let mut mesh = BMesh::new();
  let root = mesh.add_ball(Ball::root(Vec3::ZERO, 1.0)).unwrap();
  let tips = directions
    .iter()
    .map(|direction| {
      let tip = mesh
        .add_ball(Ball::key(direction.normalize() * length, 0.5))
        .unwrap();
      mesh.add_bone(root, tip).unwrap();
      tip
    })
    .collect();
  (mesh, tips)
}

/// Walk single-child links from `start` until a leaf, collecting indices.
pub fn walk_chain(mesh: &BMesh, start: usize) -> Vec<usize> {
  let mut path = vec![start];
  let mut current = start;
  while let Some((child, _)) = mesh.first_child(current) {
    path.push(child);
    current = child;
  }
  path
}

pub fn assert_vec3_near(actual: Vec3, expected: Vec3, tolerance: f32) {
  assert!(
    (actual - expected).length() <= tolerance,
    "expected {expected}, got {actual}"
  );
}
