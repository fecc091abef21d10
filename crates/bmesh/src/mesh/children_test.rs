use glam::Vec3;

use crate::mesh::BMesh;
use crate::types::Ball;

fn star(count: usize) -> (BMesh, usize, Vec<usize>) {
  let mut mesh = BMesh::new();
  let hub = mesh.add_ball(Ball::root(Vec3::ZERO, 1.0)).unwrap();
  let leaves = (0..count)
    .map(|i| {
      let leaf = mesh.add_ball(Ball::key(Vec3::new(i as f32, 1.0, 0.0), 0.5)).unwrap();
      mesh.add_bone(hub, leaf).unwrap();
      leaf
    })
    .collect();
  (mesh, hub, leaves)
}

#[test]
fn test_first_child_of_leaf_is_none() {
  let mut mesh = BMesh::new();
  let lone = mesh.add_ball(Ball::key(Vec3::ZERO, 1.0)).unwrap();
  assert!(mesh.first_child(lone).is_none());
  assert_eq!(mesh.children(lone).count(), 0);
}

#[test]
fn test_unknown_ball_has_no_children() {
  let mesh = BMesh::new();
  assert!(mesh.first_child(3).is_none());
  assert_eq!(mesh.children(3).count(), 0);
}

/// Children come back in reverse insertion order.
#[test]
fn test_children_are_lifo() {
  let (mesh, hub, leaves) = star(4);
  let mut expected = leaves.clone();
  expected.reverse();
  assert_eq!(mesh.children(hub).collect::<Vec<_>>(), expected);
}

/// Cursor stepping visits the same sequence as the iterator.
#[test]
fn test_cursor_matches_iterator() {
  let (mesh, hub, _) = star(3);
  let mut stepped = Vec::new();
  let mut next = mesh.first_child(hub);
  while let Some((child, cursor)) = next {
    stepped.push(child);
    next = mesh.next_child(cursor);
  }
  assert_eq!(stepped, mesh.children(hub).collect::<Vec<_>>());
}

/// A fresh first_child call restarts the sequence.
#[test]
fn test_iteration_restartable() {
  let (mesh, hub, _) = star(3);
  let first: Vec<_> = mesh.children(hub).collect();
  let second: Vec<_> = mesh.children(hub).collect();
  assert_eq!(first, second);
  assert_eq!(mesh.first_child(hub).map(|(c, _)| c), first.first().copied());
}
