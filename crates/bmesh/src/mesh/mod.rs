//! BMesh - arena storage and graph builder for a ball/bone skeleton.
//!
//! All records live in flat vectors and refer to each other by index:
//!
//! ```text
//! balls:      [ Ball { first_child ─┐ } ... ]
//!                                   ▼
//! adjacency:  [ .. AdjacencyEntry { ball, next ─┐ } .. AdjacencyEntry { ball, next: None } ]
//!                                               └──────────────▲
//! ```
//!
//! Each bone inserts two adjacency entries, one per endpoint, so the graph
//! is bidirectional until subdivision rewrites it into a rooted tree.
//! Entries are prepended, so children iterate in reverse insertion order.
//! Entries orphaned by subdivision are never reclaimed.

mod children;

pub use children::{ChildCursor, Children};

use crate::config::BMeshConfig;
use crate::error::{reserve_one, BMeshError, Result};
use crate::types::{AdjacencyEntry, Ball, BallType, Bone, Quad};

/// Skeleton arenas plus the per-pass round counter.
#[derive(Clone, Debug)]
pub struct BMesh {
  pub(crate) balls: Vec<Ball>,
  pub(crate) bones: Vec<Bone>,
  pub(crate) adjacency: Vec<AdjacencyEntry>,
  pub(crate) quads: Vec<Quad>,
  pub(crate) root: Option<usize>,
  /// Generation stamp, incremented once per subdivision pass.
  pub(crate) round: u32,
  /// Bones added since the last subdivision round still link both ways.
  pub(crate) pending_bones: bool,
  pub(crate) config: BMeshConfig,
}

impl BMesh {
  /// Empty mesh with the default configuration.
  pub fn new() -> Self {
    Self {
      balls: Vec::new(),
      bones: Vec::new(),
      adjacency: Vec::new(),
      quads: Vec::new(),
      root: None,
      round: 0,
      pending_bones: false,
      config: BMeshConfig::default(),
    }
  }

  /// Empty mesh with a validated configuration.
  pub fn with_config(config: BMeshConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self {
      config,
      ..Self::new()
    })
  }

  pub fn config(&self) -> &BMeshConfig {
    &self.config
  }

  // ===========================================================================
  // Balls
  // ===========================================================================

  /// Append a ball, returning its index.
  ///
  /// The ball's index and adjacency fields are reset. A second ROOT ball is
  /// rejected and the mesh is left unchanged.
  pub fn add_ball(&mut self, mut ball: Ball) -> Result<usize> {
    let index = self.balls.len();
    if ball.ball_type == BallType::Root {
      if let Some(existing) = self.root {
        tracing::warn!(existing, rejected = index, "add_ball: duplicate root ball");
        return Err(BMeshError::DuplicateRoot {
          existing,
          rejected: index,
        });
      }
    }
    reserve_one(&mut self.balls, "add_ball")?;
    ball.index = index;
    ball.first_child = None;
    ball.child_count = 0;
    self.balls.push(ball);
    if ball.ball_type == BallType::Root {
      self.root = Some(index);
    }
    Ok(index)
  }

  pub fn ball_count(&self) -> usize {
    self.balls.len()
  }

  pub fn ball(&self, index: usize) -> Option<&Ball> {
    self.balls.get(index)
  }

  pub fn ball_mut(&mut self, index: usize) -> Option<&mut Ball> {
    self.balls.get_mut(index)
  }

  /// All balls in insertion order.
  pub fn balls(&self) -> &[Ball] {
    &self.balls
  }

  pub fn root_index(&self) -> Option<usize> {
    self.root
  }

  pub fn root_ball(&self) -> Option<&Ball> {
    self.root.and_then(|index| self.balls.get(index))
  }

  /// Current subdivision round (0 before the first pass).
  pub fn round(&self) -> u32 {
    self.round
  }

  // ===========================================================================
  // Bones
  // ===========================================================================

  /// Append a bone and link both endpoints to each other.
  pub fn add_bone(&mut self, first_ball: usize, second_ball: usize) -> Result<usize> {
    for index in [first_ball, second_ball] {
      if index >= self.balls.len() {
        tracing::error!(index, "add_bone: ball index out of range");
        return Err(BMeshError::InvalidBall {
          operation: "add_bone",
          index,
        });
      }
    }
    let index = self.bones.len();
    reserve_one(&mut self.bones, "add_bone")?;
    let mut bone = Bone::new(first_ball, second_ball);
    bone.index = index;
    self.bones.push(bone);
    self.pending_bones = true;
    self.add_child_relation(first_ball, second_ball)?;
    self.add_child_relation(second_ball, first_ball)?;
    Ok(index)
  }

  pub fn bone_count(&self) -> usize {
    self.bones.len()
  }

  pub fn bone(&self, index: usize) -> Option<&Bone> {
    self.bones.get(index)
  }

  // ===========================================================================
  // Adjacency
  // ===========================================================================

  /// Prepend `child` to `parent`'s adjacency list. O(1).
  pub(crate) fn add_child_relation(&mut self, parent: usize, child: usize) -> Result<()> {
    let Some(head) = self.balls.get(parent).map(|ball| ball.first_child) else {
      tracing::error!(parent, "add_child_relation: ball index out of range");
      return Err(BMeshError::InvalidBall {
        operation: "add_child_relation",
        index: parent,
      });
    };
    let entry = self.adjacency.len();
    reserve_one(&mut self.adjacency, "add_child_relation")?;
    self.adjacency.push(AdjacencyEntry {
      ball: child,
      next: head,
    });
    let parent = &mut self.balls[parent];
    parent.first_child = Some(entry);
    parent.child_count += 1;
    Ok(())
  }

  /// Detach `ball`'s adjacency list. The entries stay in the arena.
  pub(crate) fn clear_children(&mut self, ball: usize) {
    let ball = &mut self.balls[ball];
    ball.first_child = None;
    ball.child_count = 0;
  }

  /// Total adjacency records, including orphaned ones.
  pub fn adjacency_len(&self) -> usize {
    self.adjacency.len()
  }

  // ===========================================================================
  // Quads
  // ===========================================================================

  pub fn add_quad(&mut self, quad: Quad) -> Result<usize> {
    let index = self.quads.len();
    reserve_one(&mut self.quads, "add_quad")?;
    self.quads.push(quad);
    Ok(index)
  }

  pub fn quad_count(&self) -> usize {
    self.quads.len()
  }

  pub fn quad(&self, index: usize) -> Option<&Quad> {
    self.quads.get(index)
  }

  // ===========================================================================
  // Preconditions
  // ===========================================================================

  pub(crate) fn require_root(&self, operation: &'static str) -> Result<usize> {
    self.root.ok_or_else(|| {
      tracing::error!(operation, "no root ball");
      BMeshError::NoRootBall { operation }
    })
  }

  pub(crate) fn require_subdivided(&self, operation: &'static str) -> Result<()> {
    if self.round == 0 || self.pending_bones {
      tracing::error!(operation, "inbetween balls have not been generated");
      return Err(BMeshError::NotSubdivided { operation });
    }
    Ok(())
  }
}

impl Default for BMesh {
  fn default() -> Self {
    Self::new()
  }
}
