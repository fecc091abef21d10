//! Orientation sweep - propagates a continuous frame from root to leaves.
//!
//! Subdivision gives every INBETWEEN ball the frame of its own bone, which
//! jumps wherever two bones meet at a KEY ball. The sweep re-aims each KEY
//! joint halfway between the incoming and the outgoing bone:
//!
//! ```text
//!            child dir
//!               ▲
//!               │   joint dir = parent dir rotated by θ/2
//!               │ ╱            about (parent × child)
//!               │╱ θ/2
//!   ────────────●──────► parent dir
//! ```
//!
//! KEY leaves inherit their parent's frame. INBETWEEN and ROOT balls keep
//! their frame.

use smallvec::SmallVec;

use crate::error::Result;
use crate::frame::{bisect_direction, frame_from_direction, try_unit};
use crate::mesh::BMesh;
use crate::types::BallType;

impl BMesh {
  /// Propagate frames over the whole tree, starting at the root.
  ///
  /// A root without a bone direction is seeded from
  /// [`BMeshConfig::root_direction`](crate::BMeshConfig::root_direction).
  #[tracing::instrument(skip_all, name = "bmesh::sweep")]
  pub fn sweep(&mut self) -> Result<()> {
    let root = self.require_root("sweep")?;
    self.require_subdivided("sweep")?;

    self.seed_root_frame(root);
    let visited = self.sweep_from(None, root);
    tracing::debug!(visited, "sweep complete");
    Ok(())
  }

  fn seed_root_frame(&mut self, root: usize) {
    let ball = &mut self.balls[root];
    if try_unit(ball.bone_direction).is_some() {
      return;
    }
    let direction = self.config.root_direction.normalize();
    let (local_y, local_z) = frame_from_direction(direction);
    ball.bone_direction = direction;
    ball.local_y_axis = local_y;
    ball.local_z_axis = local_z;
  }

  /// Pre-order walk from `start`, whose parent is `parent`.
  ///
  /// Returns the number of balls visited.
  pub(crate) fn sweep_from(&mut self, parent: Option<usize>, start: usize) -> usize {
    let mut visited = 0;
    let mut stack: Vec<(Option<usize>, usize)> = vec![(parent, start)];
    while let Some((parent, ball)) = stack.pop() {
      self.sweep_ball(parent, ball);
      visited += 1;

      let children: SmallVec<[usize; 4]> = self.children(ball).collect();
      stack.extend(children.into_iter().rev().map(|child| (Some(ball), child)));
    }
    visited
  }

  /// Recompute the frame of a single KEY ball.
  fn sweep_ball(&mut self, parent: Option<usize>, ball: usize) {
    if self.balls[ball].ball_type != BallType::Key {
      return;
    }
    let Some(parent) = parent.map(|index| self.balls[index]) else {
      return;
    };

    match self.first_child(ball) {
      Some((child, _)) => {
        let direction = bisect_direction(parent.bone_direction, self.balls[child].bone_direction);
        let (local_y, local_z) = frame_from_direction(direction);
        let ball = &mut self.balls[ball];
        ball.bone_direction = direction;
        ball.local_y_axis = local_y;
        ball.local_z_axis = local_z;
      }
      None => {
        let ball = &mut self.balls[ball];
        ball.bone_direction = parent.bone_direction;
        ball.local_y_axis = parent.local_y_axis;
        ball.local_z_axis = parent.local_z_axis;
      }
    }
  }
}

#[cfg(test)]
#[path = "sweep_test.rs"]
mod sweep_test;
