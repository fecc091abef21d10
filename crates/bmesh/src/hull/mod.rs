//! Convex-hull collaborator used to cap the skeleton root.
//!
//! [`ConvexHull`] is the seam: stitch only submits vertices, triggers
//! generation and reads triangles back. [`IncrementalHull`] is the default
//! implementation.
//!
//! # Algorithm (beneath-beyond)
//!
//! 1. Pick an initial tetrahedron from extreme points; orient its faces so
//!    normals point away from its centroid.
//! 2. For each remaining point, collect the faces it lies strictly beyond.
//!    None means the point is inside (or on) the hull and is skipped.
//! 3. The horizon is every directed edge of a visible face whose twin does
//!    not belong to another visible face. Visible faces are removed and each
//!    horizon edge `a → b` becomes a new face `(a, b, p)`, which keeps the
//!    counter-clockwise winding.
//!
//! When all points are coplanar there is no tetrahedron; the 2D hull of the
//! points in their plane is fan-triangulated instead.

use std::collections::HashSet;

use glam::{Vec2, Vec3};

use crate::constants::DEFAULT_HULL_EPSILON;
use crate::types::Triangle;

/// Builder that triangulates the convex hull of submitted points.
pub trait ConvexHull {
  /// Submit a point, returning its stable vertex handle.
  fn add_vertex(&mut self, point: Vec3) -> usize;

  /// Triangulate all points submitted so far.
  fn generate(&mut self);

  fn triangle_count(&self) -> usize;

  fn triangle(&self, index: usize) -> Option<Triangle>;
}

/// Rendering collaborator receiving cap triangles one at a time.
pub trait TriangleSink {
  fn draw_triangle(&mut self, triangle: &Triangle);
}

impl TriangleSink for Vec<Triangle> {
  fn draw_triangle(&mut self, triangle: &Triangle) {
    self.push(*triangle);
  }
}

/// Incremental 3D convex hull over an owned point list.
#[derive(Clone, Debug)]
pub struct IncrementalHull {
  points: Vec<Vec3>,
  /// Counter-clockwise seen from outside; indices into `points`.
  faces: Vec<[usize; 3]>,
  epsilon: f32,
}

impl IncrementalHull {
  pub fn new(epsilon: f32) -> Self {
    Self {
      points: Vec::new(),
      faces: Vec::new(),
      epsilon,
    }
  }

  pub fn vertex_count(&self) -> usize {
    self.points.len()
  }

  pub fn vertex(&self, handle: usize) -> Option<Vec3> {
    self.points.get(handle).copied()
  }

  /// Face index triples from the last [`generate`](ConvexHull::generate).
  pub fn faces(&self) -> &[[usize; 3]] {
    &self.faces
  }

  /// Drop all points and faces.
  pub fn clear(&mut self) {
    self.points.clear();
    self.faces.clear();
  }

  fn unit_normal(&self, face: &[usize; 3]) -> Vec3 {
    let [a, b, c] = face.map(|i| self.points[i]);
    (b - a).cross(c - a).normalize_or_zero()
  }

  fn distance_to_face(&self, face: &[usize; 3], point: Vec3) -> f32 {
    self.unit_normal(face).dot(point - self.points[face[0]])
  }

  /// Four affinely independent points, or the first three and `None` when
  /// everything is coplanar. `None` overall for collinear or coincident input.
  fn initial_simplex(&self) -> Option<([usize; 3], Option<usize>)> {
    let points = &self.points;
    let p0 = points[0];
    let (i1, d1) = farthest(points, |p| p.distance(p0))?;
    if d1 <= self.epsilon {
      return None;
    }
    let axis = (points[i1] - p0).normalize();
    let (i2, d2) = farthest(points, |p| (p - p0).reject_from_normalized(axis).length())?;
    if d2 <= self.epsilon {
      return None;
    }
    let normal = (points[i1] - p0).cross(points[i2] - p0).normalize();
    let (i3, d3) = farthest(points, |p| normal.dot(p - p0).abs())?;
    if d3 <= self.epsilon {
      return Some(([0, i1, i2], None));
    }
    Some(([0, i1, i2], Some(i3)))
  }

  fn build_tetrahedron(&mut self, base: [usize; 3], apex: usize) {
    let [a, b, c] = base;
    let centroid = (self.points[a] + self.points[b] + self.points[c] + self.points[apex]) * 0.25;
    for face in [[a, b, c], [a, b, apex], [a, c, apex], [b, c, apex]] {
      let oriented = if self.distance_to_face(&face, centroid) > 0.0 {
        [face[0], face[2], face[1]]
      } else {
        face
      };
      self.faces.push(oriented);
    }
  }

  fn insert_point(&mut self, index: usize) {
    let point = self.points[index];
    let visible: Vec<usize> = (0..self.faces.len())
      .filter(|&f| self.distance_to_face(&self.faces[f], point) > self.epsilon)
      .collect();
    if visible.is_empty() {
      return;
    }

    let visible_edges: HashSet<(usize, usize)> = visible
      .iter()
      .flat_map(|&f| face_edges(&self.faces[f]))
      .collect();
    let horizon: Vec<(usize, usize)> = visible_edges
      .iter()
      .copied()
      .filter(|&(a, b)| !visible_edges.contains(&(b, a)))
      .collect();

    let visible: HashSet<usize> = visible.into_iter().collect();
    let mut face_index = 0;
    self.faces.retain(|_| {
      let keep = !visible.contains(&face_index);
      face_index += 1;
      keep
    });
    self
      .faces
      .extend(horizon.into_iter().map(|(a, b)| [a, b, index]));
  }

  /// Fan-triangulate the 2D hull of coplanar points.
  fn build_planar(&mut self, base: [usize; 3]) {
    let [a, b, c] = base.map(|i| self.points[i]);
    let u = (b - a).normalize();
    let normal = (b - a).cross(c - a).normalize();
    let v = normal.cross(u);
    let projected: Vec<Vec2> = self
      .points
      .iter()
      .map(|&p| Vec2::new(u.dot(p - a), v.dot(p - a)))
      .collect();

    let ring = monotone_chain(&projected, self.epsilon);
    for i in 1..ring.len().saturating_sub(1) {
      self.faces.push([ring[0], ring[i], ring[i + 1]]);
    }
  }
}

impl Default for IncrementalHull {
  fn default() -> Self {
    Self::new(DEFAULT_HULL_EPSILON)
  }
}

impl ConvexHull for IncrementalHull {
  fn add_vertex(&mut self, point: Vec3) -> usize {
    self.points.push(point);
    self.points.len() - 1
  }

  fn generate(&mut self) {
    self.faces.clear();
    if self.points.len() < 3 {
      return;
    }
    match self.initial_simplex() {
      None => {}
      Some((base, None)) => self.build_planar(base),
      Some((base, Some(apex))) => {
        self.build_tetrahedron(base, apex);
        for index in 0..self.points.len() {
          if index != apex && !base.contains(&index) {
            self.insert_point(index);
          }
        }
      }
    }
  }

  fn triangle_count(&self) -> usize {
    self.faces.len()
  }

  fn triangle(&self, index: usize) -> Option<Triangle> {
    let face = self.faces.get(index)?;
    Some(Triangle {
      pt: face.map(|i| self.points[i]),
    })
  }
}

fn farthest(points: &[Vec3], metric: impl Fn(Vec3) -> f32) -> Option<(usize, f32)> {
  points
    .iter()
    .map(|&p| metric(p))
    .enumerate()
    .max_by(|(_, a), (_, b)| a.total_cmp(b))
}

fn face_edges(face: &[usize; 3]) -> [(usize, usize); 3] {
  [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])]
}

/// Counter-clockwise hull of 2D points (Andrew's monotone chain).
///
/// Collinear boundary points are dropped.
fn monotone_chain(points: &[Vec2], epsilon: f32) -> Vec<usize> {
  let mut order: Vec<usize> = (0..points.len()).collect();
  order.sort_by(|&i, &j| {
    points[i]
      .x
      .total_cmp(&points[j].x)
      .then(points[i].y.total_cmp(&points[j].y))
  });

  let turn = |o: usize, a: usize, b: usize| (points[a] - points[o]).perp_dot(points[b] - points[o]);
  let mut ring: Vec<usize> = Vec::with_capacity(points.len() + 1);
  for pass in [order.clone(), order.into_iter().rev().collect::<Vec<_>>()] {
    let floor = ring.len();
    for index in pass {
      while ring.len() >= floor + 2 && turn(ring[ring.len() - 2], ring[ring.len() - 1], index) <= epsilon {
        ring.pop();
      }
      ring.push(index);
    }
    ring.pop();
  }
  ring
}
