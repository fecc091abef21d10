//! Error type for skeleton construction and generation passes.

use std::collections::TryReserveError;

/// Failure of a [`BMesh`](crate::BMesh) operation.
///
/// Each variant names the operation that failed. Passes do not roll back:
/// after an error the mesh is partially mutated but still indexable.
#[derive(Debug, thiserror::Error)]
pub enum BMeshError {
  /// Backing array growth failed.
  #[error("{operation}: array growth failed")]
  Allocation {
    operation: &'static str,
    #[source]
    source: TryReserveError,
  },

  /// A pass that starts at the root ran on a mesh without one.
  #[error("{operation}: no root ball")]
  NoRootBall { operation: &'static str },

  /// A second ROOT ball was added.
  #[error("root ball already present at index {existing}, rejected new root at index {rejected}")]
  DuplicateRoot { existing: usize, rejected: usize },

  /// A ball index that does not exist in the arena.
  #[error("{operation}: ball index {index} out of range")]
  InvalidBall { operation: &'static str, index: usize },

  /// Sweep or stitch invoked before subdivision, or after bones were added
  /// since the last subdivision round.
  #[error("{operation}: inbetween balls have not been generated for every bone")]
  NotSubdivided { operation: &'static str },

  #[error("invalid configuration: {0}")]
  InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, BMeshError>;

/// Reserve room for one more element, mapping growth failure to
/// [`BMeshError::Allocation`].
pub(crate) fn reserve_one<T>(items: &mut Vec<T>, operation: &'static str) -> Result<()> {
  items.try_reserve(1).map_err(|source| {
    tracing::error!(operation, "array growth failed");
    BMeshError::Allocation { operation, source }
  })
}
