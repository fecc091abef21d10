//! First-child / next-sibling traversal over a ball's adjacency list.

use super::BMesh;

/// Position in an adjacency list. `None` once the list is exhausted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChildCursor(pub(crate) Option<usize>);

impl BMesh {
  /// First child of `ball` and a cursor for the rest of its list.
  ///
  /// Returns `None` for a ball without children or an unknown index.
  pub fn first_child(&self, ball: usize) -> Option<(usize, ChildCursor)> {
    let head = self.balls.get(ball)?.first_child?;
    self.next_child(ChildCursor(Some(head)))
  }

  /// Child at `cursor` and the advanced cursor.
  pub fn next_child(&self, cursor: ChildCursor) -> Option<(usize, ChildCursor)> {
    let entry = self.adjacency.get(cursor.0?)?;
    Some((entry.ball, ChildCursor(entry.next)))
  }

  /// Lazy iterator over `ball`'s children, most recently linked first.
  pub fn children(&self, ball: usize) -> Children<'_> {
    Children {
      mesh: self,
      cursor: ChildCursor(self.balls.get(ball).and_then(|b| b.first_child)),
    }
  }
}

/// Iterator returned by [`BMesh::children`].
pub struct Children<'a> {
  mesh: &'a BMesh,
  cursor: ChildCursor,
}

impl Iterator for Children<'_> {
  type Item = usize;

  fn next(&mut self) -> Option<usize> {
    let (child, cursor) = self.mesh.next_child(self.cursor)?;
    self.cursor = cursor;
    Some(child)
  }
}

#[cfg(test)]
#[path = "children_test.rs"]
mod children_test;
