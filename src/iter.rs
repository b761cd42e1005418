use crate::index::{IndexType, NodeIndex};
use crate::node::{Color, Node};

/// Pushes a link of nodes on the left to stack.
fn left_link<K, Ix>(nodes: &[Node<K, Ix>], mut x: NodeIndex<Ix>, stack: &mut Vec<NodeIndex<Ix>>)
where
    Ix: IndexType,
{
    while !x.is_sentinel() {
        stack.push(x);
        x = nodes[x.index()].left();
    }
}

/// A read-only view of a linked node.
#[derive(Debug)]
pub struct NodeRef<'a, K, Ix> {
    index: NodeIndex<Ix>,
    node: &'a Node<K, Ix>,
    key: &'a K,
}

impl<K, Ix> Clone for NodeRef<'_, K, Ix>
where
    Ix: IndexType,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, Ix> Copy for NodeRef<'_, K, Ix> where Ix: IndexType {}

impl<'a, K, Ix> NodeRef<'a, K, Ix>
where
    Ix: IndexType,
{
    /// `None` for the sentinel and vacant slots.
    pub(crate) fn new(index: NodeIndex<Ix>, node: &'a Node<K, Ix>) -> Option<Self> {
        let key = node.key.as_ref()?;
        Some(NodeRef { index, node, key })
    }

    /// Handle of this node
    pub fn index(&self) -> NodeIndex<Ix> {
        self.index
    }

    pub fn key(&self) -> &'a K {
        self.key
    }

    pub fn color(&self) -> Color {
        self.node.color()
    }

    pub fn is_red(&self) -> bool {
        self.node.is_red()
    }

    pub fn is_black(&self) -> bool {
        self.node.is_black()
    }

    /// Left child, `None` when absent
    pub fn left(&self) -> Option<NodeIndex<Ix>> {
        self.node.left().linked()
    }

    /// Right child, `None` when absent
    pub fn right(&self) -> Option<NodeIndex<Ix>> {
        self.node.right().linked()
    }

    /// Parent, `None` for the root
    pub fn parent(&self) -> Option<NodeIndex<Ix>> {
        self.node.parent().linked()
    }
}

/// A preorder iterator over the nodes of a `RbTree`.
///
/// The children of a node are pushed before the node is yielded, so the
/// pending walk never depends on the node just handed out.
#[derive(Debug)]
pub struct Preorder<'a, K, Ix> {
    nodes: &'a [Node<K, Ix>],
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
}

impl<'a, K, Ix> Preorder<'a, K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(nodes: &'a [Node<K, Ix>], root: NodeIndex<Ix>) -> Self {
        Preorder {
            nodes,
            stack: root.linked().into_iter().collect(),
        }
    }
}

impl<'a, K, Ix> Iterator for Preorder<'a, K, Ix>
where
    Ix: IndexType,
{
    type Item = NodeRef<'a, K, Ix>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        let nodes = self.nodes;
        let node = &nodes[x.index()];
        self.stack.extend(node.right().linked());
        self.stack.extend(node.left().linked());
        NodeRef::new(x, node)
    }
}

/// An iterator over the keys of a `RbTree`, in order.
#[derive(Debug)]
pub struct Iter<'a, K, Ix> {
    nodes: &'a [Node<K, Ix>],
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
}

impl<'a, K, Ix> Iter<'a, K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(nodes: &'a [Node<K, Ix>], root: NodeIndex<Ix>) -> Self {
        let mut stack = vec![];
        left_link(nodes, root, &mut stack);
        Iter { nodes, stack }
    }
}

impl<'a, K, Ix> Iterator for Iter<'a, K, Ix>
where
    Ix: IndexType,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        let nodes = self.nodes;
        let node = &nodes[x.index()];
        left_link(nodes, node.right(), &mut self.stack);
        node.key.as_ref()
    }
}

/// An into iterator over the keys of a `RbTree`, in order.
#[derive(Debug)]
pub struct IntoIter<K, Ix> {
    nodes: Vec<Node<K, Ix>>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
}

impl<K, Ix> IntoIter<K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(nodes: Vec<Node<K, Ix>>, root: NodeIndex<Ix>) -> Self {
        let mut stack = vec![];
        left_link(&nodes, root, &mut stack);
        IntoIter { nodes, stack }
    }
}

impl<K, Ix> Iterator for IntoIter<K, Ix>
where
    Ix: IndexType,
{
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        let right = self.nodes[x.index()].right();
        left_link(&self.nodes, right, &mut self.stack);
        self.nodes[x.index()].key.take()
    }
}
