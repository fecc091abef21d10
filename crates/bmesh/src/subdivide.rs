//! Subdivision engine - replaces each bone with an evenly spaced chain.
//!
//! # Algorithm
//!
//! One pass per call, stamped with a fresh round number:
//!
//! 1. Depth-first walk from the root. A ball is entered at most once per
//!    round; on entry its adjacency list is snapshotted and cleared.
//! 2. For every snapshotted child that has not been entered this round, the
//!    bone `parent → child` is split into `floor(D / step)` equal segments
//!    (one midpoint split when that yields no interior point) and relinked
//!    as `parent → b1 → ... → bn → child`.
//! 3. The walk then descends into the original child.
//!
//! Bones with an INBETWEEN endpoint were produced by an earlier round and are
//! relinked without splitting, so repeated passes leave the ball count alone.
//!
//! Back-references (child → parent) are dropped because the parent has
//! already been entered, leaving a tree hanging from the root.
//!
//! ```text
//! before:  P ════════════════════ C          D = 2.0, step = 0.4
//! after:   P ── b1 ── b2 ── b3 ── b4 ── C    segments 0.4 each
//! ```

use glam::Vec3;
use smallvec::SmallVec;

use crate::constants::STEP_EPSILON;
use crate::error::Result;
use crate::frame::frame_from_direction;
use crate::mesh::BMesh;
use crate::types::{Ball, BallType};

/// Counters reported by [`BMesh::generate_inbetween_balls`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubdivisionStats {
  /// Round number stamped by this pass.
  pub round: u32,
  /// Balls entered by the walk.
  pub balls_visited: usize,
  /// Snapshotted edges whose child was already visited.
  pub edges_skipped: usize,
  /// Edges short enough to relink without new balls.
  pub edges_relinked: usize,
  /// Edges replaced by an inbetween chain.
  pub edges_subdivided: usize,
  /// INBETWEEN balls appended.
  pub balls_inserted: usize,
}

/// Shared frame assigned to every inbetween ball of one bone.
#[derive(Clone, Copy)]
struct BoneFrame {
  direction: Vec3,
  local_y: Vec3,
  local_z: Vec3,
}

/// Explicit-stack stand-in for one level of the recursive walk.
struct WalkFrame {
  parent: usize,
  children: SmallVec<[usize; 4]>,
  next: usize,
}

impl BMesh {
  /// Subdivide every bone reachable from the root.
  ///
  /// Fails with [`NoRootBall`](crate::BMeshError::NoRootBall) before any
  /// mutation if no root was added. An allocation failure aborts the pass
  /// without rollback.
  #[tracing::instrument(skip_all, name = "bmesh::subdivide")]
  pub fn generate_inbetween_balls(&mut self) -> Result<SubdivisionStats> {
    let root = self.require_root("generate_inbetween_balls")?;
    self.round = self.round.wrapping_add(1);
    self.pending_bones = false;

    let mut stats = SubdivisionStats {
      round: self.round,
      ..Default::default()
    };
    let mut stack: Vec<WalkFrame> = Vec::new();
    if let Some(frame) = self.enter(root, &mut stats) {
      stack.push(frame);
    }

    while let Some(frame) = stack.last_mut() {
      if frame.next == frame.children.len() {
        stack.pop();
        continue;
      }
      let parent = frame.parent;
      let child = frame.children[frame.next];
      frame.next += 1;

      if let Err(err) = self.subdivide_bone(parent, child, &mut stats) {
        tracing::error!(parent, child, "generate_inbetween_balls: bone subdivision failed");
        return Err(err);
      }
      if let Some(frame) = self.enter(child, &mut stats) {
        stack.push(frame);
      }
    }

    tracing::debug!(
      round = stats.round,
      visited = stats.balls_visited,
      subdivided = stats.edges_subdivided,
      inserted = stats.balls_inserted,
      "subdivision complete"
    );
    Ok(stats)
  }

  /// Stamp `ball` for this round and detach its children for rewriting.
  ///
  /// Returns `None` if the ball was already entered this round.
  fn enter(&mut self, ball: usize, stats: &mut SubdivisionStats) -> Option<WalkFrame> {
    if self.balls[ball].round_color == self.round {
      return None;
    }
    self.balls[ball].round_color = self.round;
    stats.balls_visited += 1;

    let children: SmallVec<[usize; 4]> = self.children(ball).collect();
    self.clear_children(ball);
    Some(WalkFrame {
      parent: ball,
      children,
      next: 0,
    })
  }

  /// Replace the bone `parent → child` with an evenly spaced chain.
  fn subdivide_bone(&mut self, parent: usize, child: usize, stats: &mut SubdivisionStats) -> Result<()> {
    if self.balls[child].round_color == self.round {
      stats.edges_skipped += 1;
      return Ok(());
    }

    let first = self.balls[parent];
    let second = self.balls[child];
    let offset = first.position - second.position;
    let distance = offset.length();
    let step = self.config.step_distance;

    // Chains laid down by an earlier round are relinked as they are.
    let already_split =
      first.ball_type == BallType::Inbetween || second.ball_type == BallType::Inbetween;

    let mut tail = parent;
    if !already_split && distance > step + STEP_EPSILON {
      let direction = offset / distance;
      let (local_y, local_z) = frame_from_direction(direction);
      let frame = BoneFrame {
        direction,
        local_y,
        local_z,
      };

      let step_count = ((distance + STEP_EPSILON) / step).floor().max(1.0) as usize;
      let remaining = distance - step * step_count as f32;
      let adjusted_step = step + remaining / step_count as f32;

      if step_count > 1 {
        for i in 1..step_count {
          let frac = adjusted_step * i as f32 / distance;
          tail = self.add_inbetween_ball(&first, &second, frac, tail, frame)?;
          stats.balls_inserted += 1;
        }
      } else {
        tail = self.add_inbetween_ball(&first, &second, 0.5, tail, frame)?;
        stats.balls_inserted += 1;
      }
      stats.edges_subdivided += 1;
    } else {
      stats.edges_relinked += 1;
    }

    self.add_child_relation(tail, child)
  }

  /// Append one interpolated INBETWEEN ball as the sole child of `tail`.
  fn add_inbetween_ball(
    &mut self,
    first: &Ball,
    second: &Ball,
    frac: f32,
    tail: usize,
    frame: BoneFrame,
  ) -> Result<usize> {
    let mut ball = Ball::new(
      BallType::Inbetween,
      first.position.lerp(second.position, frac),
      first.radius * (1.0 - frac) + second.radius * frac,
    );
    ball.bone_direction = frame.direction;
    ball.local_y_axis = frame.local_y;
    ball.local_z_axis = frame.local_z;

    let index = self.add_ball(ball)?;
    self.add_child_relation(tail, index)?;
    Ok(index)
  }
}

#[cfg(test)]
#[path = "subdivide_test.rs"]
mod subdivide_test;
