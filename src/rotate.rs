//! Rotations. These are the only operations that relink children while a tree rebalances.
//!
//! Each one takes the root of a subtree and returns the node which took its place. The caller is
//! responsible for hanging the returned node back into the slot the old root came from.

use tracing::debug;

use crate::node::{Direction, NodeId};
use crate::tree::Tree;

impl<V> Tree<V> {
    /// Promotes the child of `node` in `direction` to be the root of the subtree. The promoted
    /// node's inner child becomes `node`'s child.
    ///
    /// ## Panics
    ///
    /// When `node` has no child in `direction`.
    ///
    /// # Diagram
    ///
    /// Rotating `node` with `direction` set to `Right`:
    ///
    /// ```text
    ///    node                  promoted
    ///    /  \                   /    \
    ///   x   promoted  rotate-> node   z
    ///        /   \             /  \
    ///       y     z           x    y
    /// ```
    pub(crate) fn rotate(&mut self, node: NodeId, direction: Direction) -> NodeId {
        let promoted = self
            .arena
            .child(node, direction)
            .expect("rotation needs a child on the promoted side");
        let inner = self.arena.child(promoted, direction.opposite());

        self.arena.get_mut(node).set_child(direction, inner);
        self.arena
            .get_mut(promoted)
            .set_child(direction.opposite(), Some(node));
        promoted
    }

    /// A single rotation of a subtree whose heavy child leans the same way it does. Both nodes end
    /// up level.
    pub(crate) fn rotate_single(&mut self, node: NodeId, direction: Direction) -> NodeId {
        let root = self.rotate(node, direction);
        self.arena.set_balance(node, 0);
        self.arena.set_balance(root, 0);

        debug!(
            from = self.arena.key(node),
            to = self.arena.key(root),
            ?direction,
            "single rotation"
        );
        root
    }

    /// A double rotation of a subtree whose heavy child leans against it: the child is rotated
    /// the other way first, then `node` is rotated in `direction`. The grandchild becomes the new
    /// root.
    pub(crate) fn rotate_double(&mut self, node: NodeId, direction: Direction) -> NodeId {
        let child = self
            .arena
            .child(node, direction)
            .expect("double rotation needs a heavy child");
        let grandchild = self.rotate(child, direction.opposite());
        self.arena
            .get_mut(node)
            .set_child(direction, Some(grandchild));
        let root = self.rotate(node, direction);

        // Whichever side of the grandchild was shorter leaves its new parent leaning.
        let sign = direction.sign();
        let (node_balance, child_balance) = match self.arena.balance(root) {
            b if b == sign => (-sign, 0),
            b if b == -sign => (0, sign),
            _ => (0, 0),
        };
        self.arena.set_balance(node, node_balance);
        self.arena.set_balance(child, child_balance);
        self.arena.set_balance(root, 0);

        debug!(
            from = self.arena.key(node),
            to = self.arena.key(root),
            ?direction,
            "double rotation"
        );
        root
    }

    /// Restores balance at a node leaning two levels to one side and returns the new subtree root,
    /// along with whether the subtree got shorter than it was before the node started leaning.
    ///
    /// A heavy child leaning against its parent calls for a double rotation. A level heavy child
    /// (which only happens after a delete) is rotated once and leaves both nodes leaning, with the
    /// subtree height unchanged.
    pub(crate) fn rebalance_at(&mut self, node: NodeId) -> (NodeId, bool) {
        let direction = if self.arena.balance(node) < 0 {
            Direction::Left
        } else {
            Direction::Right
        };
        let child = self
            .arena
            .child(node, direction)
            .expect("a node two levels heavy has a child on its heavy side");
        let sign = direction.sign();

        match self.arena.balance(child) {
            b if b == -sign => (self.rotate_double(node, direction), true),
            0 => {
                let root = self.rotate(node, direction);
                self.arena.set_balance(node, sign);
                self.arena.set_balance(root, -sign);
                debug!(
                    from = self.arena.key(node),
                    to = self.arena.key(root),
                    ?direction,
                    "single rotation with a level child"
                );
                (root, false)
            }
            _ => (self.rotate_single(node, direction), true),
        }
    }
}
