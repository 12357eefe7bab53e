//! An explicit stack of the ancestors visited while descending the tree.
//!
//! Recursion would unwind the path before we get to use it, but rebalancing and splaying both need
//! to walk back up the exact nodes the descent went through, so the path is recorded here instead.

use crate::error::TreeError;
use crate::node::NodeId;

/// Ordered record of the nodes visited during one descent, root first. It only ever lives for the
/// duration of a single tree operation.
#[derive(Debug)]
pub struct PathStack {
    items: Vec<NodeId>,
    capacity: usize,
}

impl PathStack {
    /// Creates a stack sized for a tree holding `node_count` nodes: twice the bit length of the
    /// count, so a root-to-leaf path of a balanced tree never needs to grow.
    pub fn for_node_count(node_count: usize) -> Result<Self, TreeError> {
        let capacity = 2 * bit_length(node_count);
        let mut items = Vec::new();
        items.try_reserve_exact(capacity)?;
        Ok(Self { items, capacity })
    }

    /// Appends a node, doubling the capacity first when the stack is full.
    pub fn push(&mut self, node: NodeId) -> Result<(), TreeError> {
        if self.items.len() == self.capacity {
            self.grow()?;
        }
        self.items.push(node);
        Ok(())
    }

    /// Removes and returns the most recently pushed node.
    ///
    /// ## Panics
    ///
    /// When the stack is empty. Callers always check [`PathStack::is_empty`] or
    /// [`PathStack::peek`] first; popping past the root is a logic error.
    pub fn pop(&mut self) -> NodeId {
        self.items.pop().expect("pop from an empty path stack")
    }

    /// The most recently pushed node, if any.
    pub fn peek(&self) -> Option<NodeId> {
        self.items.last().copied()
    }

    /// Number of nodes currently recorded.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no node is recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes the stack holds before it has to grow again.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Moves every node of `other` onto this stack, keeping their order.
    pub(crate) fn append(&mut self, other: &mut PathStack) -> Result<(), TreeError> {
        for node in other.items.drain(..) {
            self.push(node)?;
        }
        Ok(())
    }

    fn grow(&mut self) -> Result<(), TreeError> {
        // `try_reserve_exact` counts elements, not bytes.
        let additional = self.capacity.max(1);
        self.items.try_reserve_exact(additional)?;
        self.capacity += additional;
        Ok(())
    }
}

/// `floor(log2(n)) + 1` for positive `n`, and 1 for zero.
fn bit_length(n: usize) -> usize {
    let bits = (usize::BITS - n.leading_zeros()) as usize;
    bits.max(1)
}
