//! Core data types for the ball/bone skeleton.

use glam::Vec3;

/// Role of a ball in the skeleton.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BallType {
  /// Single root where all branches converge. Capped by stitch.
  Root,

  /// Original, user-authored joint.
  Key,

  /// Node synthesized by subdivision.
  Inbetween,
}

/// Weighted point node with a local orientation frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ball {
  /// Stable arena index, assigned on insertion.
  pub index: usize,
  pub ball_type: BallType,
  pub position: Vec3,
  pub radius: f32,
  /// Head of this ball's adjacency list.
  pub first_child: Option<usize>,
  /// Number of entries linked into the adjacency list.
  pub child_count: usize,
  /// Subdivision round that last visited this ball.
  pub round_color: u32,
  pub local_y_axis: Vec3,
  pub local_z_axis: Vec3,
  pub bone_direction: Vec3,
}

impl Ball {
  /// Create an unlinked ball with a zero frame.
  pub fn new(ball_type: BallType, position: Vec3, radius: f32) -> Self {
    Self {
      index: 0,
      ball_type,
      position,
      radius,
      first_child: None,
      child_count: 0,
      round_color: 0,
      local_y_axis: Vec3::ZERO,
      local_z_axis: Vec3::ZERO,
      bone_direction: Vec3::ZERO,
    }
  }

  /// Root ball at `position`.
  pub fn root(position: Vec3, radius: f32) -> Self {
    Self::new(BallType::Root, position, radius)
  }

  /// User-authored joint at `position`.
  pub fn key(position: Vec3, radius: f32) -> Self {
    Self::new(BallType::Key, position, radius)
  }

  /// True if the ball has no adjacency entries.
  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.first_child.is_none()
  }

  /// Cross-section square spanned by the local frame, scaled by radius.
  ///
  /// Corner order: `-y+z`, `-y-z`, `+y-z`, `+y+z`.
  pub fn cross_section(&self) -> Quad {
    let y = self.local_y_axis * self.radius;
    let z = self.local_z_axis * self.radius;
    Quad {
      pt: [
        self.position - y + z,
        self.position - y - z,
        self.position + y - z,
        self.position + y + z,
      ],
    }
  }
}

/// Undirected edge between two balls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bone {
  pub index: usize,
  pub first_ball: usize,
  pub second_ball: usize,
}

impl Bone {
  pub fn new(first_ball: usize, second_ball: usize) -> Self {
    Self {
      index: 0,
      first_ball,
      second_ball,
    }
  }
}

/// Adjacency arena record. Not an owned node: `next` is an index into the
/// same arena, `None` terminates the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdjacencyEntry {
  /// Neighbor ball index.
  pub ball: usize,
  /// Next entry in the owner's list.
  pub next: Option<usize>,
}

/// Four-corner cross-section, accumulated as convex-hull input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
  pub pt: [Vec3; 4],
}

/// Output triangle of the convex hull.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
  pub pt: [Vec3; 3],
}

impl Triangle {
  /// Unnormalized face normal (counter-clockwise winding).
  #[inline]
  pub fn normal(&self) -> Vec3 {
    (self.pt[1] - self.pt[0]).cross(self.pt[2] - self.pt[0])
  }

  #[inline]
  pub fn centroid(&self) -> Vec3 {
    (self.pt[0] + self.pt[1] + self.pt[2]) / 3.0
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
