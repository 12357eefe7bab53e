//! Move-to-root adjustment for splay trees.

use tracing::debug;

use crate::node::{Direction, NodeId};
use crate::path::PathStack;
use crate::tree::Tree;

impl<V> Tree<V> {
    /// Rotates `node` up one level per ancestor on `path` until it is the root. `path` must hold
    /// every ancestor of `node`, root first, and is empty afterwards.
    ///
    /// Every step is a plain rotation with the parent; there is no zig-zig/zig-zag pairing.
    pub(crate) fn splay(&mut self, node: NodeId, path: &mut PathStack) {
        let key = self.arena.key(node);
        let mut rotations = 0;
        while !path.is_empty() {
            let parent = path.pop();
            let direction = Direction::toward(key, self.arena.key(parent));
            let slot = self.slot_above(path, parent);
            let promoted = self.rotate(parent, direction);
            debug_assert_eq!(promoted, node);
            self.link(slot, Some(promoted));
            rotations += 1;
        }
        debug!(key, rotations, "splayed to root");
    }
}
