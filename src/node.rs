//! Nodes, the arena they live in, and the tree-wide cells every node can see.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::error::TreeError;

/// The balancing strategy of a tree. Chosen once when the tree is created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// A plain binary tree. Inserts land where a search would end and deletes only ever promote a
    /// child.
    Binary,
    /// A binary search tree which never rebalances.
    Unbalanced,
    /// A height-balanced (AVL) search tree.
    Avl,
    /// A search tree which rotates every inserted or accessed node up to the root.
    Splay,
}

/// Which child of a node. `Left` is index 0 and `Right` is index 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards smaller keys.
    Left = 0,
    /// Towards larger keys.
    Right = 1,
}

impl Direction {
    /// The direction a search for `key` takes at a node holding `node_key`. Equal keys go left.
    pub fn toward(key: i64, node_key: i64) -> Self {
        if key > node_key {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    /// The other child.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// -1 for `Left`, +1 for `Right`. This is how a unit of extra height on this side moves a
    /// balance factor.
    pub fn sign(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Index of a node in its tree's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// The cells shared by a tree and all of its nodes.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) node_count: Cell<usize>,
    pub(crate) variant: Variant,
}

pub(crate) struct Node<V> {
    pub(crate) key: i64,
    pub(crate) children: [Option<NodeId>; 2],
    pub(crate) balance: i8,
    pub(crate) attachment: Option<V>,
    pub(crate) shared: Rc<Shared>,
}

impl<V> Node<V> {
    pub(crate) fn child(&self, direction: Direction) -> Option<NodeId> {
        self.children[direction.index()]
    }

    pub(crate) fn set_child(&mut self, direction: Direction, child: Option<NodeId>) {
        self.children[direction.index()] = child;
    }
}

/// Owns every node of one tree. Released slots are recycled through a free list.
pub(crate) struct Arena<V> {
    slots: Vec<Option<Node<V>>>,
    free: Vec<NodeId>,
}

impl<V> Arena<V> {
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, TreeError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        Ok(Self {
            slots,
            free: Vec::new(),
        })
    }

    /// Stores a new childless node and bumps the shared node count. Nothing links to the node
    /// yet; the caller does that once this has succeeded.
    pub(crate) fn alloc(
        &mut self,
        key: i64,
        attachment: Option<V>,
        shared: &Rc<Shared>,
    ) -> Result<NodeId, TreeError> {
        // The free list must be able to take back every slot so that `release` never allocates.
        self.free
            .try_reserve(self.slots.len() + 1 - self.free.len())?;
        if self.free.is_empty() {
            self.slots.try_reserve(1)?;
        }

        let node = Node {
            key,
            children: [None, None],
            balance: 0,
            attachment,
            shared: Rc::clone(shared),
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        };
        shared.node_count.set(shared.node_count.get() + 1);
        Ok(id)
    }

    /// Frees the slot of a node nothing links to anymore and drops the shared node count.
    pub(crate) fn release(&mut self, id: NodeId) -> Node<V> {
        let node = self.slots[id.0]
            .take()
            .expect("released a node that was already released");
        self.free.push(id);
        let count = &node.shared.node_count;
        count.set(count.get() - 1);
        node
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node<V> {
        self.slots[id.0].as_ref().expect("dangling node id")
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<V> {
        self.slots[id.0].as_mut().expect("dangling node id")
    }

    pub(crate) fn key(&self, id: NodeId) -> i64 {
        self.get(id).key
    }

    pub(crate) fn child(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        self.get(id).child(direction)
    }

    pub(crate) fn balance(&self, id: NodeId) -> i8 {
        self.get(id).balance
    }

    pub(crate) fn set_balance(&mut self, id: NodeId, balance: i8) {
        self.get_mut(id).balance = balance;
    }
}

impl<V> Arena<V>
where
    V: Clone,
{
    /// Copies every node, pointing the copies at a different set of shared cells.
    pub(crate) fn clone_with(&self, shared: &Rc<Shared>) -> Self {
        let slots = self
            .slots
            .iter()
            .map(|slot| {
                slot.as_ref().map(|node| Node {
                    key: node.key,
                    children: node.children,
                    balance: node.balance,
                    attachment: node.attachment.clone(),
                    shared: Rc::clone(shared),
                })
            })
            .collect::<Vec<_>>();
        let mut free = Vec::with_capacity(slots.len() + 1);
        free.extend_from_slice(&self.free);
        Self { slots, free }
    }
}

/// A read-only view of one node, borrowed from its tree.
pub struct NodeRef<'a, V> {
    arena: &'a Arena<V>,
    id: NodeId,
}

impl<'a, V> Clone for NodeRef<'a, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, V> Copy for NodeRef<'a, V> {}

impl<'a, V> NodeRef<'a, V> {
    pub(crate) fn new(arena: &'a Arena<V>, id: NodeId) -> Self {
        Self { arena, id }
    }

    fn node(&self) -> &'a Node<V> {
        self.arena.get(self.id)
    }

    /// The arena index of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The key stored in this node.
    pub fn key(&self) -> i64 {
        self.node().key
    }

    /// Height of the right subtree minus height of the left subtree. Only maintained by AVL
    /// trees; always 0 for the other variants.
    pub fn balance_factor(&self) -> i8 {
        self.node().balance
    }

    /// The value attached when the key was inserted, if any.
    pub fn attachment(&self) -> Option<&'a V> {
        self.node().attachment.as_ref()
    }

    /// The child in the given direction.
    pub fn child(&self, direction: Direction) -> Option<Self> {
        self.node()
            .child(direction)
            .map(|id| NodeRef::new(self.arena, id))
    }

    /// The left child.
    pub fn left(&self) -> Option<Self> {
        self.child(Direction::Left)
    }

    /// The right child.
    pub fn right(&self) -> Option<Self> {
        self.child(Direction::Right)
    }

    /// The balancing strategy of the tree this node belongs to.
    pub fn variant(&self) -> Variant {
        self.node().shared.variant
    }

    /// How many nodes the tree this node belongs to currently holds.
    pub fn tree_len(&self) -> usize {
        self.node().shared.node_count.get()
    }
}

impl<'a, V> fmt::Debug for NodeRef<'a, V>
where
    V: fmt::Debug,
{
    // TODO stack based Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key())
            .field("balance", &self.balance_factor())
            .field("attachment", &self.attachment())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}
