//! The variant-dispatching tree: descent, insert, delete, lookup and teardown.
//!
//! # Examples
//!
//! ```
//! use multibst::{Tree, TreeError, Variant};
//!
//! let mut tree = Tree::new(Variant::Avl, 22).unwrap();
//! for key in [24, 2, 44, 23] {
//!     tree.insert(key).unwrap();
//! }
//!
//! assert_eq!(tree.in_order().collect::<Vec<_>>(), [2, 22, 23, 24, 44]);
//! assert_eq!(tree.insert(24), Err(TreeError::DuplicateKey(24)));
//!
//! tree.delete(44).unwrap();
//! assert_eq!(tree.len(), 4);
//!
//! // The key the tree was created with stays put.
//! assert_eq!(tree.delete(22), Err(TreeError::KeyNotFound(22)));
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::node::{Arena, Direction, NodeId, NodeRef, Shared, Variant};
use crate::path::PathStack;

/// An ordered set of `i64` keys, each with an optional attachment `V`, balanced according to its
/// [`Variant`].
///
/// A tree always holds at least one node: the sentinel key it was created with, which can't be
/// deleted.
pub struct Tree<V = ()> {
    pub(crate) arena: Arena<V>,
    pub(crate) root: NodeId,
    sentinel: i64,
    shared: Rc<Shared>,
}

/// Where a node hangs: from the tree itself, or from one side of another node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Root,
    Child(NodeId, Direction),
}

/// The outcome of [`Tree::find_parent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Descent {
    /// The key is the one stored at the root, which has no parent.
    IsRoot,
    /// The last node visited. The key is either its child in the search direction or would be
    /// inserted there.
    Parent(NodeId),
}

impl Tree<()> {
    /// Creates a tree of the given variant holding only `sentinel`.
    pub fn new(variant: Variant, sentinel: i64) -> Result<Self, TreeError> {
        Self::with_config(TreeConfig::default().variant(variant).sentinel(sentinel))
    }
}

impl<V> Tree<V> {
    /// Creates a tree from a [`TreeConfig`].
    pub fn with_config(config: TreeConfig) -> Result<Self, TreeError> {
        let shared = Rc::new(Shared {
            node_count: Cell::new(0),
            variant: config.variant,
        });
        let mut arena = Arena::with_capacity(config.capacity.max(1))?;
        let root = arena.alloc(config.sentinel, None, &shared)?;

        debug!(variant = ?config.variant, sentinel = config.sentinel, "created tree");
        Ok(Self {
            arena,
            root,
            sentinel: config.sentinel,
            shared,
        })
    }

    /// The balancing strategy this tree was created with.
    pub fn variant(&self) -> Variant {
        self.shared.variant
    }

    /// The number of nodes in the tree, sentinel included.
    pub fn len(&self) -> usize {
        self.shared.node_count.get()
    }

    /// The key the tree was created with.
    pub fn sentinel_key(&self) -> i64 {
        self.sentinel
    }

    /// The node currently at the root. Rotations may have moved the sentinel away from here.
    pub fn root(&self) -> NodeRef<'_, V> {
        NodeRef::new(&self.arena, self.root)
    }

    /// Looks up a key without changing the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use multibst::{Tree, Variant};
    ///
    /// let mut tree = Tree::new(Variant::Unbalanced, 10).unwrap();
    /// tree.insert(4).unwrap();
    ///
    /// assert_eq!(tree.find(4).map(|n| n.key()), Some(4));
    /// assert!(tree.find(42).is_none());
    /// ```
    pub fn find(&self, key: i64) -> Option<NodeRef<'_, V>> {
        let mut current = self.root;
        loop {
            let node = self.arena.get(current);
            if node.key == key {
                return Some(NodeRef::new(&self.arena, current));
            }
            current = node.child(Direction::toward(key, node.key))?;
        }
    }

    /// Whether the key is stored in the tree.
    pub fn contains(&self, key: i64) -> bool {
        self.find(key).is_some()
    }

    /// Looks up a key the way the tree's variant wants lookups done. Splay trees rotate the key up
    /// to the root; every other variant behaves like [`Tree::find`].
    ///
    /// # Examples
    ///
    /// ```
    /// use multibst::{Tree, Variant};
    ///
    /// let mut tree = Tree::new(Variant::Splay, 10).unwrap();
    /// tree.insert(4).unwrap();
    /// tree.insert(12).unwrap();
    ///
    /// tree.access(4).unwrap();
    /// assert_eq!(tree.root().key(), 4);
    /// ```
    pub fn access(&mut self, key: i64) -> Result<NodeRef<'_, V>, TreeError> {
        let node = match self.variant() {
            Variant::Splay => {
                let mut path = PathStack::for_node_count(self.len())?;
                let (_, node) = self
                    .locate(key, Some(&mut path))?
                    .ok_or(TreeError::KeyNotFound(key))?;
                self.splay(node, &mut path);
                node
            }
            Variant::Binary | Variant::Unbalanced | Variant::Avl => {
                self.find(key).ok_or(TreeError::KeyNotFound(key))?.id()
            }
        };
        Ok(NodeRef::new(&self.arena, node))
    }

    /// Number of edges between the root and the node holding `key`.
    pub fn depth(&self, key: i64) -> Option<usize> {
        let mut current = self.root;
        let mut depth = 0;
        loop {
            let node = self.arena.get(current);
            if node.key == key {
                return Some(depth);
            }
            current = node.child(Direction::toward(key, node.key))?;
            depth += 1;
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level = vec![self.root];
        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|&id| self.arena.get(id).children)
                .flatten()
                .collect();
        }
        height
    }

    /// Inserts a key with no attachment.
    pub fn insert(&mut self, key: i64) -> Result<(), TreeError> {
        self.insert_node(key, None)
    }

    /// Inserts a key together with an attachment.
    ///
    /// # Examples
    ///
    /// ```
    /// use multibst::{Tree, TreeConfig, TreeError};
    ///
    /// let mut tree = Tree::with_config(TreeConfig::default()).unwrap();
    /// tree.insert_with(3, "three").unwrap();
    ///
    /// assert_eq!(tree.find(3).and_then(|n| n.attachment()), Some(&"three"));
    /// assert_eq!(tree.insert_with(3, "again"), Err(TreeError::DuplicateKey(3)));
    /// ```
    pub fn insert_with(&mut self, key: i64, value: V) -> Result<(), TreeError> {
        self.insert_node(key, Some(value))
    }

    fn insert_node(&mut self, key: i64, attachment: Option<V>) -> Result<(), TreeError> {
        let mut path = PathStack::for_node_count(self.len())?;
        let parent = match self.find_parent(key, Some(&mut path))? {
            Descent::IsRoot => return Err(TreeError::DuplicateKey(key)),
            Descent::Parent(parent) => parent,
        };
        let direction = Direction::toward(key, self.arena.key(parent));
        if self.arena.child(parent, direction).is_some() {
            return Err(TreeError::DuplicateKey(key));
        }

        let node = self.arena.alloc(key, attachment, &self.shared)?;
        self.arena.get_mut(parent).set_child(direction, Some(node));
        debug!(key, parent = self.arena.key(parent), ?direction, "inserted");

        match self.variant() {
            Variant::Binary | Variant::Unbalanced => {}
            Variant::Avl => self.rebalance_after_insert(&mut path, key),
            Variant::Splay => self.splay(node, &mut path),
        }
        Ok(())
    }

    /// Removes a key and returns its attachment. The sentinel key can't be removed and reports
    /// [`TreeError::KeyNotFound`] just like a missing key.
    ///
    /// # Examples
    ///
    /// ```
    /// use multibst::{Tree, TreeConfig, TreeError, Variant};
    ///
    /// let mut tree = Tree::with_config(TreeConfig::default().variant(Variant::Splay)).unwrap();
    /// tree.insert_with(1, 'a').unwrap();
    ///
    /// assert_eq!(tree.delete(1), Ok(Some('a')));
    /// assert_eq!(tree.delete(1), Err(TreeError::KeyNotFound(1)));
    /// assert_eq!(tree.delete(0), Err(TreeError::KeyNotFound(0)));
    /// ```
    pub fn delete(&mut self, key: i64) -> Result<Option<V>, TreeError> {
        if key == self.sentinel {
            return Err(TreeError::KeyNotFound(key));
        }
        let mut path = PathStack::for_node_count(self.len())?;
        let (slot, node) = self
            .locate(key, Some(&mut path))?
            .ok_or(TreeError::KeyNotFound(key))?;

        match self.variant() {
            Variant::Binary => self.unlink_promoting(slot, node),
            Variant::Unbalanced | Variant::Splay => {
                self.unlink_splicing(slot, node, None)?;
            }
            Variant::Avl => {
                let probe = self.unlink_splicing(slot, node, Some(&mut path))?;
                self.rebalance_after_delete(&mut path, probe);
            }
        }
        let removed = self.arena.release(node);
        debug!(key, "deleted");

        if self.variant() == Variant::Splay && !path.is_empty() {
            let parent = path.pop();
            self.splay(parent, &mut path);
        }
        Ok(removed.attachment)
    }

    /// Tears the tree down one node at a time, children before parents, and returns how many
    /// nodes were released.
    pub fn destroy(mut self) -> usize {
        let mut pending = vec![self.root];
        let mut order = Vec::with_capacity(self.len());
        while let Some(id) = pending.pop() {
            order.push(id);
            pending.extend(self.arena.get(id).children.iter().flatten());
        }

        let mut released = 0;
        while let Some(id) = order.pop() {
            self.arena.release(id);
            released += 1;
        }
        debug_assert_eq!(self.len(), 0);
        debug!(released, "destroyed tree");
        released
    }

    /// Walks from the root towards `key`, recording every visited node in `path`. Stops at the
    /// last node before either an empty child slot or the child holding `key`.
    pub(crate) fn find_parent(
        &self,
        key: i64,
        mut path: Option<&mut PathStack>,
    ) -> Result<Descent, TreeError> {
        let mut parent = self.root;
        if self.arena.key(parent) == key {
            return Ok(Descent::IsRoot);
        }
        loop {
            if let Some(path) = path.as_mut() {
                path.push(parent)?;
            }
            let direction = Direction::toward(key, self.arena.key(parent));
            match self.arena.child(parent, direction) {
                Some(child) if self.arena.key(child) != key => parent = child,
                _ => break,
            }
        }
        trace!(key, parent = self.arena.key(parent), "descent");
        Ok(Descent::Parent(parent))
    }

    /// The node holding `key` and the slot it hangs from.
    pub(crate) fn locate(
        &self,
        key: i64,
        path: Option<&mut PathStack>,
    ) -> Result<Option<(Slot, NodeId)>, TreeError> {
        Ok(match self.find_parent(key, path)? {
            Descent::IsRoot => Some((Slot::Root, self.root)),
            Descent::Parent(parent) => {
                let direction = Direction::toward(key, self.arena.key(parent));
                self.arena
                    .child(parent, direction)
                    .map(|child| (Slot::Child(parent, direction), child))
            }
        })
    }

    /// The slot `node` hangs from, given a path whose top is its parent.
    pub(crate) fn slot_above(&self, path: &PathStack, node: NodeId) -> Slot {
        match path.peek() {
            Some(parent) => Slot::Child(
                parent,
                Direction::toward(self.arena.key(node), self.arena.key(parent)),
            ),
            None => Slot::Root,
        }
    }

    pub(crate) fn link(&mut self, slot: Slot, node: Option<NodeId>) {
        match slot {
            Slot::Root => self.root = node.expect("the sentinel keeps the tree non-empty"),
            Slot::Child(parent, direction) => self.arena.get_mut(parent).set_child(direction, node),
        }
    }

    /// Unlinks `node` by promoting its children. With two children the right subtree is hung off
    /// the rightmost node of the left one.
    fn unlink_promoting(&mut self, slot: Slot, node: NodeId) {
        let left = self.arena.child(node, Direction::Left);
        let right = self.arena.child(node, Direction::Right);
        if let (Some(left), Some(_)) = (left, right) {
            let mut rightmost = left;
            while let Some(next) = self.arena.child(rightmost, Direction::Right) {
                rightmost = next;
            }
            self.arena
                .get_mut(rightmost)
                .set_child(Direction::Right, right);
        }
        self.link(slot, left.or(right));
    }

    /// Unlinks `node`, replacing it with its in-order predecessor when it has two children.
    ///
    /// When `path` is given, the nodes whose subtrees lost a node below the primary path are
    /// pushed onto it, deepest last: the predecessor in its new position, then every node of the
    /// predecessor's own path. Returns the key which, compared against each node of the
    /// resulting path, points towards the side that shrank.
    fn unlink_splicing(
        &mut self,
        slot: Slot,
        node: NodeId,
        path: Option<&mut PathStack>,
    ) -> Result<i64, TreeError> {
        let left = self.arena.child(node, Direction::Left);
        let right = self.arena.child(node, Direction::Right);
        let (left, right) = match (left, right) {
            (Some(left), Some(right)) => (left, right),
            (only, other) => {
                self.link(slot, only.or(other));
                return Ok(self.arena.key(node));
            }
        };

        let mut predecessor_path = PathStack::for_node_count(self.len())?;
        let predecessor = self.predecessor(left, &mut predecessor_path)?;
        let predecessor_parent = predecessor_path.peek();
        if let Some(path) = path {
            path.push(predecessor)?;
            path.append(&mut predecessor_path)?;
        }

        if let Some(predecessor_parent) = predecessor_parent {
            let orphan = self.arena.child(predecessor, Direction::Left);
            self.arena
                .get_mut(predecessor_parent)
                .set_child(Direction::Right, orphan);
            self.arena
                .get_mut(predecessor)
                .set_child(Direction::Left, Some(left));
        }
        let balance = self.arena.balance(node);
        let spliced = self.arena.get_mut(predecessor);
        spliced.set_child(Direction::Right, Some(right));
        spliced.balance = balance;
        self.link(slot, Some(predecessor));

        let key = self.arena.key(predecessor);
        trace!(key, "spliced predecessor");
        Ok(key)
    }

    /// The rightmost node below `left`, recording every node passed on the way there.
    fn predecessor(&self, left: NodeId, path: &mut PathStack) -> Result<NodeId, TreeError> {
        let mut current = left;
        while let Some(right) = self.arena.child(current, Direction::Right) {
            path.push(current)?;
            current = right;
        }
        Ok(current)
    }
}

impl<V> Clone for Tree<V>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        let shared = Rc::new(Shared {
            node_count: Cell::new(self.len()),
            variant: self.variant(),
        });
        Self {
            arena: self.arena.clone_with(&shared),
            root: self.root,
            sentinel: self.sentinel,
            shared,
        }
    }
}

impl<V> fmt::Debug for Tree<V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("variant", &self.variant())
            .field("len", &self.len())
            .field("root", &self.root())
            .finish()
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    const SENTINEL: i64 = 0;

    /// Applies a set of operations to a tree and a set.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes we have the same set of keys in both.
    fn do_ops(ops: &[Op], tree: &mut Tree, model: &mut BTreeSet<i64>) {
        for op in ops {
            match *op {
                Op::Insert(key) => {
                    let key = i64::from(key);
                    let expected = if model.insert(key) {
                        Ok(())
                    } else {
                        Err(TreeError::DuplicateKey(key))
                    };
                    assert_eq!(tree.insert(key), expected);
                }
                Op::Delete(key) => {
                    let key = i64::from(key);
                    let expected = if key != SENTINEL && model.remove(&key) {
                        Ok(None)
                    } else {
                        Err(TreeError::KeyNotFound(key))
                    };
                    assert_eq!(tree.delete(key), expected);
                }
                Op::Access(key) => {
                    let key = i64::from(key);
                    let found = tree.access(key).map(|n| n.key()).ok();
                    assert_eq!(found, model.get(&key).copied());
                }
            }
        }
    }

    fn fuzz(variant: Variant, ops: &[Op]) -> (Tree, BTreeSet<i64>) {
        let mut tree = Tree::new(variant, SENTINEL).unwrap();
        let mut model = BTreeSet::new();
        model.insert(SENTINEL);

        do_ops(ops, &mut tree, &mut model);
        (tree, model)
    }

    fn matches(tree: &Tree, model: &BTreeSet<i64>) -> bool {
        tree.len() == model.len() && tree.in_order().eq(model.iter().copied())
    }

    /// The height of the subtree if every balance factor in it is right.
    fn balanced(node: Option<NodeRef<'_, ()>>) -> Option<i64> {
        let Some(node) = node else {
            return Some(0);
        };
        let left = balanced(node.left())?;
        let right = balanced(node.right())?;
        let factor = right - left;
        (factor.abs() <= 1 && factor == i64::from(node.balance_factor()))
            .then(|| left.max(right) + 1)
    }

    quickcheck::quickcheck! {
        fn fuzz_binary(ops: Vec<Op>) -> bool {
            let (tree, model) = fuzz(Variant::Binary, &ops);
            matches(&tree, &model)
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_unbalanced(ops: Vec<Op>) -> bool {
            let (tree, model) = fuzz(Variant::Unbalanced, &ops);
            matches(&tree, &model)
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_avl(ops: Vec<Op>) -> bool {
            let (tree, model) = fuzz(Variant::Avl, &ops);
            matches(&tree, &model) && balanced(Some(tree.root())).is_some()
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_splay(ops: Vec<Op>) -> bool {
            let (tree, model) = fuzz(Variant::Splay, &ops);
            matches(&tree, &model)
        }
    }

    quickcheck::quickcheck! {
        fn avl_stays_balanced_after_every_op(ops: Vec<Op>) -> bool {
            let mut tree = Tree::new(Variant::Avl, SENTINEL).unwrap();
            let mut model = BTreeSet::new();
            model.insert(SENTINEL);

            ops.iter().all(|op| {
                do_ops(std::slice::from_ref(op), &mut tree, &mut model);
                balanced(Some(tree.root())).is_some()
            })
        }
    }

    quickcheck::quickcheck! {
        fn insert_then_delete_restores_keys(xs: Vec<i8>, x: i8) -> bool {
            let x = i64::from(x);
            [Variant::Binary, Variant::Unbalanced, Variant::Avl, Variant::Splay]
                .iter()
                .all(|&variant| {
                    let mut tree = Tree::new(variant, SENTINEL).unwrap();
                    for &key in &xs {
                        let _ = tree.insert(i64::from(key));
                    }
                    if tree.contains(x) {
                        return true;
                    }
                    let before = tree.in_order().collect::<Vec<_>>();
                    let len = tree.len();

                    tree.insert(x).unwrap();
                    tree.delete(x).unwrap();
                    tree.in_order().collect::<Vec<_>>() == before && tree.len() == len
                })
        }
    }
}
