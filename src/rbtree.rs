use std::cmp::Ordering;

use compare::{Compare, Natural};
use log::trace;

use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::iter::{IntoIter, Iter, NodeRef, Preorder};
use crate::node::{Color, Node, Side};

/// A red-black tree whose nodes live in an arena and are addressed by [`NodeIndex`].
///
/// Keys that compare equal are all kept; each one stays addressable through
/// the handle its `insert` returned.
#[derive(Debug, Clone)]
pub struct RbTree<K, C = Natural<K>, Ix = DefaultIx> {
    /// Vector that stores nodes, slot 0 is the sentinel
    pub(crate) nodes: Vec<Node<K, Ix>>,
    /// Root of the tree, the sentinel when empty
    pub(crate) root: NodeIndex<Ix>,
    /// Vacant slots left behind by `remove`
    pub(crate) free: Vec<NodeIndex<Ix>>,
    /// Number of linked nodes
    pub(crate) len: usize,
    /// Ordering of the keys
    pub(crate) cmp: C,
}

impl<K: Ord> RbTree<K> {
    /// Create an empty `RbTree` ordered by `K: Ord`.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(compare::natural())
    }
}

impl<K: Ord> Default for RbTree<K> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> RbTree<K, C>
where
    C: Compare<K>,
{
    /// Create an empty `RbTree` ordered by `cmp`.
    ///
    /// # Example
    /// ```rust
    /// use rbtree_arena::RbTree;
    ///
    /// // Newest first.
    /// let mut tree = RbTree::with_comparator(|a: &u64, b: &u64| b.cmp(a));
    /// tree.insert(1);
    /// tree.insert(3);
    /// tree.insert(2);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// ```
    #[inline]
    #[must_use]
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_capacity_and_comparator(0, cmp)
    }
}

impl<K, Ix> RbTree<K, Natural<K>, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Creates a new `RbTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, compare::natural())
    }
}

impl<K, C, Ix> RbTree<K, C, Ix>
where
    C: Compare<K>,
    Ix: IndexType,
{
    /// Creates a new `RbTree` with estimated capacity, ordered by `cmp`.
    #[inline]
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        let mut nodes = vec![Node::sentinel()];
        nodes.reserve(capacity);
        RbTree {
            nodes,
            root: NodeIndex::sentinel(),
            free: Vec::new(),
            len: 0,
            cmp,
        }
    }

    /// Link `key` into the tree and return the handle of its node.
    ///
    /// A key equal to keys already present is placed after all of them.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rbtree_arena::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// let a = tree.insert(7);
    /// let b = tree.insert(7);
    /// assert_ne!(a, b);
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.get(a), Some(&7));
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K) -> NodeIndex<Ix> {
        let z = self.alloc(key);
        self.insert_inner(z);
        self.len = self.len.wrapping_add(1);
        z
    }

    /// Find a node whose key compares equal to `key`.
    ///
    /// Among several equal keys the one closest to the root is returned.
    ///
    /// # Example
    /// ```rust
    /// use rbtree_arena::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// let five = tree.insert(5);
    /// tree.insert(9);
    /// assert_eq!(tree.find(&5), Some(five));
    /// assert_eq!(tree.find(&6), None);
    /// ```
    #[inline]
    pub fn find(&self, key: &K) -> Option<NodeIndex<Ix>> {
        let mut x = self.root;
        while !x.is_sentinel() {
            match self.cmp.compare(key, self.node_ref(x, Node::key)) {
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => x = self.node_ref(x, Node::right),
                Ordering::Equal => return Some(x),
            }
        }
        None
    }

    /// Return `true` if some node holds a key equal to `key`.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }
}

impl<K, C, Ix> RbTree<K, C, Ix>
where
    Ix: IndexType,
{
    /// Unlink `node` and hand its key back.
    ///
    /// Returns `None`, leaving the tree untouched, when `node` does not name a
    /// linked node. Handles of every other node stay valid; the freed slot may
    /// be reused by a later `insert`.
    ///
    /// # Example
    /// ```rust
    /// use rbtree_arena::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// let first = tree.insert(1);
    /// let second = tree.insert(1);
    /// assert_eq!(tree.remove(second), Some(1));
    /// assert_eq!(tree.remove(second), None);
    /// assert_eq!(tree.find(&1), Some(first));
    /// ```
    #[inline]
    pub fn remove(&mut self, node: NodeIndex<Ix>) -> Option<K> {
        if !self.is_linked(node) {
            return None;
        }
        self.remove_inner(node);
        self.len = self.len.wrapping_sub(1);
        self.free.push(node);
        self.nodes[node.index()].vacate()
    }

    /// Return the key of a linked node.
    #[inline]
    pub fn get(&self, node: NodeIndex<Ix>) -> Option<&K> {
        self.node(node).map(|n| n.key())
    }

    /// Return a view of a linked node.
    #[inline]
    pub fn node(&self, node: NodeIndex<Ix>) -> Option<NodeRef<'_, K, Ix>> {
        if !self.is_linked(node) {
            return None;
        }
        NodeRef::new(node, &self.nodes[node.index()])
    }

    /// Handle of the root node, `None` when the tree is empty.
    #[inline]
    pub fn root(&self) -> Option<NodeIndex<Ix>> {
        self.root.linked()
    }

    /// Visit every node in preorder: a node, then its left subtree, then its right subtree.
    ///
    /// # Example
    /// ```rust
    /// use rbtree_arena::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// for k in [2, 1, 3] {
    ///     tree.insert(k);
    /// }
    /// let mut seen = vec![];
    /// tree.traverse(|n| seen.push(*n.key()));
    /// assert_eq!(seen, vec![2, 1, 3]);
    /// ```
    #[inline]
    pub fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(NodeRef<'_, K, Ix>),
    {
        for node in self.preorder() {
            visitor(node);
        }
    }

    /// Get a preorder iterator over the nodes.
    #[inline]
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_, K, Ix> {
        Preorder::new(&self.nodes, self.root)
    }

    /// Get an iterator over the keys, sorted by the tree's ordering.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, Ix> {
        Iter::new(&self.nodes, self.root)
    }

    /// Remove all elements from the tree
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::sentinel());
        self.free.clear();
        self.root = NodeIndex::sentinel();
        self.len = 0;
    }

    /// Return the number of elements in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, C, Ix> IntoIterator for RbTree<K, C, Ix>
where
    Ix: IndexType,
{
    type Item = K;
    type IntoIter = IntoIter<K, Ix>;

    /// Consume the tree, yielding the keys in order.
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.nodes, self.root)
    }
}

impl<'a, K, C, Ix> IntoIterator for &'a RbTree<K, C, Ix>
where
    Ix: IndexType,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, C, Ix> RbTree<K, C, Ix>
where
    C: Compare<K>,
    Ix: IndexType,
{
    /// Attach `z` as a leaf below the last node of its search path, then rebalance.
    fn insert_inner(&mut self, z: NodeIndex<Ix>) {
        let mut y = NodeIndex::sentinel();
        let mut x = self.root;
        let mut side = Side::Left;

        while !x.is_sentinel() {
            y = x;
            side = match self
                .cmp
                .compare(self.node_ref(z, Node::key), self.node_ref(x, Node::key))
            {
                Ordering::Less => Side::Left,
                Ordering::Equal | Ordering::Greater => Side::Right,
            };
            x = self.node_ref(x, |xn| xn.child(side));
        }
        self.node_mut(z, Node::set_parent(y));
        if y.is_sentinel() {
            self.root = z;
        } else {
            self.node_mut(y, Node::set_child(side, z));
        }

        self.insert_fixup(z);
    }
}

impl<K, C, Ix> RbTree<K, C, Ix>
where
    Ix: IndexType,
{
    /// Place `key` in a fresh red leaf, reusing a vacant slot when there is one.
    fn alloc(&mut self, key: K) -> NodeIndex<Ix> {
        if let Some(idx) = self.free.pop() {
            trace!("reusing slot {idx:?}");
            self.nodes[idx.index()] = Node::new(key);
            return idx;
        }
        let idx = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != idx,
            "Reached maximum number of nodes"
        );
        self.nodes.push(Node::new(key));
        idx
    }

    fn is_linked(&self, node: NodeIndex<Ix>) -> bool {
        !node.is_sentinel()
            && self
                .nodes
                .get(node.index())
                .is_some_and(Node::is_occupied)
    }

    /// Unlink `z`, splicing in its in-order successor when it has two children.
    fn remove_inner(&mut self, z: NodeIndex<Ix>) {
        let z_left = self.node_ref(z, Node::left);
        let z_right = self.node_ref(z, Node::right);
        let removed_color;
        let x;

        if z_left.is_sentinel() || z_right.is_sentinel() {
            x = if z_left.is_sentinel() { z_right } else { z_left };
            removed_color = self.node_ref(z, Node::color);
            self.transplant(z, x);
        } else {
            let y = self.tree_minimum(z_right);
            removed_color = self.node_ref(y, Node::color);
            x = self.node_ref(y, Node::right);
            if y == z_right {
                // x may be the sentinel; the fixup reads its parent.
                self.node_mut(x, Node::set_parent(y));
            } else {
                self.transplant(y, x);
                self.node_mut(y, Node::set_child(Side::Right, z_right));
                self.node_mut(z_right, Node::set_parent(y));
            }
            self.transplant(z, y);
            self.node_mut(y, Node::set_child(Side::Left, z_left));
            self.node_mut(z_left, Node::set_parent(y));
            self.node_mut(y, Node::set_color(self.node_ref(z, Node::color)));
        }

        if matches!(removed_color, Color::Black) {
            self.remove_fixup(x);
        }
        self.node_mut(NodeIndex::sentinel(), Node::set_parent(NodeIndex::sentinel()));
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            // A red parent is never the root, so the grandparent is a real node.
            let parent = self.node_ref(z, Node::parent);
            let grand = self.node_ref(parent, Node::parent);
            let side = self.side_of(parent);
            let uncle = self.node_ref(grand, |gn| gn.child(side.opposite()));

            if self.node_ref(uncle, Node::is_red) {
                trace!("insert fixup: recolor below {grand:?}");
                self.node_mut(parent, Node::set_color(Color::Black));
                self.node_mut(uncle, Node::set_color(Color::Black));
                self.node_mut(grand, Node::set_color(Color::Red));
                z = grand;
                continue;
            }
            if self.side_of(z) != side {
                trace!("insert fixup: straighten inner grandchild {z:?}");
                self.rotate(parent, side);
                z = parent;
            }
            trace!("insert fixup: rotate {grand:?}");
            self.parent_mut(z, Node::set_color(Color::Black));
            self.node_mut(grand, Node::set_color(Color::Red));
            self.rotate(grand, side.opposite());
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Restore red-black tree properties after a remove.
    ///
    /// `x` carries the extra black of the removed node until it reaches a red
    /// node or the root, or a rotation absorbs it.
    fn remove_fixup(&mut self, mut x: NodeIndex<Ix>) {
        while x != self.root && self.node_ref(x, Node::is_black) {
            let parent = self.node_ref(x, Node::parent);
            let side = self.side_of(x);
            let far = side.opposite();
            let mut w = self.node_ref(parent, |pn| pn.child(far));

            if self.node_ref(w, Node::is_red) {
                trace!("remove fixup: red sibling {w:?}");
                self.node_mut(w, Node::set_color(Color::Black));
                self.node_mut(parent, Node::set_color(Color::Red));
                self.rotate(parent, side);
                w = self.node_ref(parent, |pn| pn.child(far));
            }
            if w.is_sentinel() {
                break;
            }

            let near_black = self.child_ref(w, side, Node::is_black);
            let far_black = self.child_ref(w, far, Node::is_black);
            if near_black && far_black {
                trace!("remove fixup: push deficit above {parent:?}");
                self.node_mut(w, Node::set_color(Color::Red));
                x = parent;
                continue;
            }
            if far_black {
                trace!("remove fixup: turn near nephew of {w:?} outward");
                self.child_mut(w, side, Node::set_color(Color::Black));
                self.node_mut(w, Node::set_color(Color::Red));
                self.rotate(w, far);
                w = self.node_ref(parent, |pn| pn.child(far));
            }
            trace!("remove fixup: rotate {parent:?}");
            self.node_mut(w, Node::set_color(self.node_ref(parent, Node::color)));
            self.node_mut(parent, Node::set_color(Color::Black));
            self.child_mut(w, far, Node::set_color(Color::Black));
            self.rotate(parent, side);
            x = self.root;
        }
        self.node_mut(x, Node::set_color(Color::Black));
    }

    /// Binary tree rotation moving `x` down towards `side`.
    ///
    /// `Side::Left` is a left rotation: the right child of `x` takes its place.
    pub(crate) fn rotate(&mut self, x: NodeIndex<Ix>, side: Side) {
        let up = side.opposite();
        let y = self.node_ref(x, |xn| xn.child(up));
        debug_assert!(!y.is_sentinel(), "rotation needs a child to lift");

        let inner = self.node_ref(y, |yn| yn.child(side));
        self.node_mut(x, Node::set_child(up, inner));
        if !inner.is_sentinel() {
            self.node_mut(inner, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_child(side, x));
    }

    /// Hand the position of `x` to `y` during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        let parent = self.node_ref(x, Node::parent);
        self.node_mut(y, Node::set_parent(parent));
        if parent.is_sentinel() {
            self.root = y;
        } else {
            let side = self.side_of(x);
            self.node_mut(parent, Node::set_child(side, y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Find the leftmost node of the subtree at `x`.
    fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.node_ref(x, Node::left).is_sentinel() {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Replace one subtree as a child of its parent with another subtree.
    ///
    /// The parent of `v` is written even when `v` is the sentinel.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>) {
        let parent = self.node_ref(u, Node::parent);
        if parent.is_sentinel() {
            self.root = v;
        } else {
            let side = self.side_of(u);
            self.node_mut(parent, Node::set_child(side, v));
        }
        self.node_mut(v, Node::set_parent(parent));
    }

    /// Which child slot of its parent `node` occupies.
    fn side_of(&self, node: NodeIndex<Ix>) -> Side {
        if self.parent_ref(node, Node::left) == node {
            Side::Left
        } else {
            Side::Right
        }
    }
}

// Convenient methods for reference or mutate current/parent/child node
impl<'a, K, C, Ix> RbTree<K, C, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn child_ref<F, R>(&'a self, node: NodeIndex<Ix>, side: Side, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].child(side).index();
        op(&self.nodes[idx])
    }

    fn child_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, side: Side, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].child(side).index();
        op(&mut self.nodes[idx])
    }
}
