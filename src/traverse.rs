//! Key iterators in the four classic orders. Every walk keeps its own explicit stack or queue, so
//! a degenerate tree can't overflow the call stack.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::node::{Arena, Direction, NodeId};
use crate::tree::Tree;

impl<V> Tree<V> {
    /// Keys level by level, left to right within a level.
    pub fn breadth_first(&self) -> BreadthFirst<'_, V> {
        BreadthFirst {
            arena: &self.arena,
            queue: VecDeque::from(vec![self.root]),
        }
    }

    /// Each key before the keys of its subtrees.
    pub fn pre_order(&self) -> PreOrder<'_, V> {
        PreOrder {
            arena: &self.arena,
            stack: vec![self.root],
        }
    }

    /// Keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use multibst::{Tree, Variant};
    ///
    /// let mut tree = Tree::new(Variant::Splay, 3).unwrap();
    /// for key in [9, -1, 4] {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// assert_eq!(tree.in_order().collect::<Vec<_>>(), [-1, 3, 4, 9]);
    /// ```
    pub fn in_order(&self) -> InOrder<'_, V> {
        let mut in_order = InOrder {
            arena: &self.arena,
            stack: Vec::new(),
        };
        in_order.push_left_spine(Some(self.root));
        in_order
    }

    /// Each key after the keys of its subtrees.
    pub fn post_order(&self) -> PostOrder<'_, V> {
        PostOrder {
            arena: &self.arena,
            stack: vec![(self.root, false)],
        }
    }
}

/// See [`Tree::breadth_first`].
pub struct BreadthFirst<'a, V> {
    arena: &'a Arena<V>,
    queue: VecDeque<NodeId>,
}

impl<'a, V> Iterator for BreadthFirst<'a, V> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let node = self.arena.get(self.queue.pop_front()?);
        self.queue.extend(node.children.iter().flatten());
        Some(node.key)
    }
}

impl<'a, V> FusedIterator for BreadthFirst<'a, V> {}

/// See [`Tree::pre_order`].
pub struct PreOrder<'a, V> {
    arena: &'a Arena<V>,
    stack: Vec<NodeId>,
}

impl<'a, V> Iterator for PreOrder<'a, V> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let node = self.arena.get(self.stack.pop()?);
        // Right first so the left subtree comes off the stack first.
        self.stack.extend(node.child(Direction::Right));
        self.stack.extend(node.child(Direction::Left));
        Some(node.key)
    }
}

impl<'a, V> FusedIterator for PreOrder<'a, V> {}

/// See [`Tree::in_order`].
pub struct InOrder<'a, V> {
    arena: &'a Arena<V>,
    stack: Vec<NodeId>,
}

impl<'a, V> InOrder<'a, V> {
    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.arena.child(id, Direction::Left);
        }
    }
}

impl<'a, V> Iterator for InOrder<'a, V> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let id = self.stack.pop()?;
        self.push_left_spine(self.arena.child(id, Direction::Right));
        Some(self.arena.key(id))
    }
}

impl<'a, V> FusedIterator for InOrder<'a, V> {}

/// See [`Tree::post_order`].
pub struct PostOrder<'a, V> {
    arena: &'a Arena<V>,
    /// Each node is pushed once unexpanded and, when popped, pushed back expanded above its
    /// children. An expanded node is ready to be yielded.
    stack: Vec<(NodeId, bool)>,
}

impl<'a, V> Iterator for PostOrder<'a, V> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        loop {
            let (id, expanded) = self.stack.pop()?;
            let node = self.arena.get(id);
            if expanded {
                return Some(node.key);
            }
            self.stack.push((id, true));
            if let Some(right) = node.child(Direction::Right) {
                self.stack.push((right, false));
            }
            if let Some(left) = node.child(Direction::Left) {
                self.stack.push((left, false));
            }
        }
    }
}

impl<'a, V> FusedIterator for PostOrder<'a, V> {}
