//! bmesh - ball/bone skeleton preparation for surface generation
//!
//! A skeleton is a sparse set of balls (position + radius) joined by
//! undirected bones. This crate turns it into a densely subdivided skeleton
//! with a continuous local frame on every ball, plus a convex-hull cap where
//! the branches meet at the root.
//!
//! # Pipeline
//!
//! ```text
//! add_ball / add_bone ──► generate_inbetween_balls ──► sweep ──► stitch
//!   (graph builder)          (subdivision engine)     (frames)   (root cap)
//! ```
//!
//! Storage is a set of flat arenas addressed by integer indices. Adjacency is
//! a singly-linked list threaded through an arena of `(ball, next)` records,
//! so indices stay stable when the backing vectors reallocate.
//!
//! # Example
//!
//! ```
//! use bmesh::{BMesh, Ball, BallType};
//! use glam::Vec3;
//!
//! # fn main() -> bmesh::Result<()> {
//! let mut mesh = BMesh::new();
//! let root = mesh.add_ball(Ball::new(BallType::Root, Vec3::ZERO, 1.0))?;
//! let tip = mesh.add_ball(Ball::new(BallType::Key, Vec3::new(0.0, 2.0, 0.0), 0.5))?;
//! mesh.add_bone(root, tip)?;
//!
//! mesh.generate_inbetween_balls()?;
//! mesh.sweep()?;
//! let cap = mesh.stitch()?;
//!
//! println!("{} balls, {} cap triangles", mesh.ball_count(), cap.triangles.len());
//! # assert_eq!(mesh.ball_count(), 6);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod hull;
pub mod mesh;
pub mod stitch;
pub mod subdivide;
pub mod sweep;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export commonly used items
pub use config::BMeshConfig;
pub use constants::{DEFAULT_STEP_DISTANCE, STEP_EPSILON};
pub use error::{BMeshError, Result};
pub use hull::{ConvexHull, IncrementalHull, TriangleSink};
pub use mesh::{BMesh, ChildCursor, Children};
pub use stitch::RootCap;
pub use subdivide::SubdivisionStats;
pub use types::{AdjacencyEntry, Ball, BallType, Bone, Quad, Triangle};
