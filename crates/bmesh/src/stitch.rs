//! Root capping - seals the junction where branches meet at the root.
//!
//! For each branch leaving the root, the first ball outside the root's
//! radius is taken as that branch's cross-section sample. Balls skipped on
//! the way are absorbed into the cap by zeroing their radius. The four
//! corners of every sample's cross-section go to the convex hull, whose
//! triangles form the cap.
//!
//! ```text
//!          ╭───── root.radius ─────╮
//!   root ● ── b1 ── b2 ── │ b3 ── b4 ── ...
//!          r=0    r=0     ▲ sample
//! ```

use smallvec::SmallVec;

use crate::error::Result;
use crate::hull::{ConvexHull, IncrementalHull, TriangleSink};
use crate::mesh::BMesh;
use crate::types::{Quad, Triangle};

/// Closing surface produced by [`BMesh::stitch`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RootCap {
  /// Sampled ball per branch, in branch iteration order.
  pub samples: Vec<usize>,
  /// Cross-section submitted for each sample.
  pub quads: Vec<Quad>,
  pub triangles: Vec<Triangle>,
}

impl RootCap {
  /// Hand every cap triangle to a rendering collaborator.
  pub fn draw(&self, sink: &mut impl TriangleSink) {
    for triangle in &self.triangles {
      sink.draw_triangle(triangle);
    }
  }
}

impl BMesh {
  /// Build the root cap with the default [`IncrementalHull`].
  pub fn stitch(&mut self) -> Result<RootCap> {
    let mut hull = IncrementalHull::new(self.config.hull_epsilon);
    self.stitch_with(&mut hull)
  }

  /// Build the root cap with a caller-provided convex hull.
  ///
  /// Cross-section quads are also appended to the mesh quad array. When
  /// [`resweep_after_stitch`](crate::BMeshConfig::resweep_after_stitch) is
  /// set, frames are propagated again over every branch afterwards.
  #[tracing::instrument(skip_all, name = "bmesh::stitch")]
  pub fn stitch_with<H: ConvexHull>(&mut self, hull: &mut H) -> Result<RootCap> {
    let root = self.require_root("stitch")?;
    self.require_subdivided("stitch")?;

    let branches: SmallVec<[usize; 8]> = self.children(root).collect();
    let mut cap = RootCap {
      samples: Vec::with_capacity(branches.len()),
      quads: Vec::with_capacity(branches.len()),
      triangles: Vec::new(),
    };

    for &branch in &branches {
      let sample = self.find_ball_for_hull(root, branch);
      let quad = self.balls[sample].cross_section();
      if let Err(err) = self.add_quad(quad) {
        tracing::error!(branch, sample, "stitch: failed to store cross-section");
        return Err(err);
      }
      for corner in quad.pt {
        hull.add_vertex(corner);
      }
      cap.samples.push(sample);
      cap.quads.push(quad);
    }

    hull.generate();
    cap.triangles = (0..hull.triangle_count())
      .filter_map(|index| hull.triangle(index))
      .collect();

    if self.config.resweep_after_stitch {
      for &branch in &branches {
        self.sweep_from(Some(root), branch);
      }
    }

    tracing::debug!(
      branches = branches.len(),
      triangles = cap.triangles.len(),
      "root cap generated"
    );
    Ok(cap)
  }

  /// Walk down a branch to the first ball outside the root radius.
  ///
  /// Stops early at a leaf. Every ball walked past has its radius zeroed.
  fn find_ball_for_hull(&mut self, root: usize, start: usize) -> usize {
    let center = self.balls[root].position;
    let limit = self.balls[root].radius;
    let mut current = start;
    loop {
      if center.distance(self.balls[current].position) > limit {
        return current;
      }
      let Some((child, _)) = self.first_child(current) else {
        return current;
      };
      self.balls[current].radius = 0.0;
      current = child;
    }
  }
}

#[cfg(test)]
#[path = "stitch_test.rs"]
mod stitch_test;
