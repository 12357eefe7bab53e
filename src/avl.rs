//! Balance factor propagation for AVL trees.
//!
//! See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.

use tracing::trace;

use crate::node::Direction;
use crate::path::PathStack;
use crate::tree::Tree;

impl<V> Tree<V> {
    /// Walks the recorded path back up after `key` was inserted below its top. A node that becomes
    /// level absorbs the new height, a node that starts leaning passes it on, and a node leaning
    /// two levels is rotated, which always restores the height it had before the insert.
    pub(crate) fn rebalance_after_insert(&mut self, path: &mut PathStack, key: i64) {
        while !path.is_empty() {
            let node = path.pop();
            let side = Direction::toward(key, self.arena.key(node));
            let balance = self.arena.balance(node) + side.sign();
            self.arena.set_balance(node, balance);

            match balance {
                0 => break,
                -1 | 1 => continue,
                _ => {
                    let slot = self.slot_above(path, node);
                    let (root, _) = self.rebalance_at(node);
                    self.link(slot, Some(root));
                    break;
                }
            }
        }
        trace!(key, remaining = path.len(), "insert rebalanced");
    }

    /// Walks the recorded path back up after a node was removed. `probe` compared against each
    /// node on the path points at the side that lost height.
    ///
    /// This mirrors the insert case: a node that starts leaning keeps its height and stops the
    /// walk, a node that becomes level got shorter and passes that on, and a rotation only stops
    /// the walk when it didn't shrink the subtree.
    pub(crate) fn rebalance_after_delete(&mut self, path: &mut PathStack, probe: i64) {
        while !path.is_empty() {
            let node = path.pop();
            let side = Direction::toward(probe, self.arena.key(node));
            let balance = self.arena.balance(node) - side.sign();
            self.arena.set_balance(node, balance);

            match balance {
                -1 | 1 => break,
                0 => continue,
                _ => {
                    let slot = self.slot_above(path, node);
                    let (root, shrank) = self.rebalance_at(node);
                    self.link(slot, Some(root));
                    if !shrank {
                        break;
                    }
                }
            }
        }
        trace!(probe, remaining = path.len(), "delete rebalanced");

        if cfg!(debug_assertions) {
            let root = self.root();
            assert!(root.balance_factor().abs() <= 1);
        }
    }
}
