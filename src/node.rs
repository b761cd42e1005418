use crate::index::{IndexType, NodeIndex};

/// Slot of the arena
#[derive(Debug, Clone)]
pub struct Node<K, Ix> {
    /// Left child, the sentinel when absent
    pub left: NodeIndex<Ix>,
    /// Right child, the sentinel when absent
    pub right: NodeIndex<Ix>,
    /// Parent, the sentinel for the root
    pub parent: NodeIndex<Ix>,
    /// Color of the node
    pub color: Color,
    /// Key of a linked node; `None` for the sentinel and for vacant slots
    pub key: Option<K>,
}

impl<K, Ix> Node<K, Ix>
where
    Ix: IndexType,
{
    /// A fresh red leaf holding `key`.
    pub fn new(key: K) -> Self {
        Node {
            left: NodeIndex::sentinel(),
            right: NodeIndex::sentinel(),
            parent: NodeIndex::sentinel(),
            color: Color::Red,
            key: Some(key),
        }
    }

    /// The sentinel, also the shape of a vacant slot.
    pub fn sentinel() -> Self {
        Node {
            left: NodeIndex::sentinel(),
            right: NodeIndex::sentinel(),
            parent: NodeIndex::sentinel(),
            color: Color::Black,
            key: None,
        }
    }
}

// Convenient getter/setter methods
impl<K, Ix> Node<K, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    pub fn is_occupied(&self) -> bool {
        self.key.is_some()
    }

    /// # Panics
    ///
    /// Panics on the sentinel or a vacant slot.
    pub fn key(&self) -> &K {
        self.key.as_ref().expect("linked node without a key")
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.left
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.right
    }

    pub fn parent(&self) -> NodeIndex<Ix> {
        self.parent
    }

    pub fn child(&self, side: Side) -> NodeIndex<Ix> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            node.color = color;
        }
    }

    pub fn set_parent(parent: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            node.parent = parent;
        }
    }

    pub fn set_child(side: Side, child: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    /// Detach the slot and give the key back.
    pub fn vacate(&mut self) -> Option<K> {
        let key = self.key.take();
        *self = Node::sentinel();
        key
    }
}

/// The color of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}

/// Which child slot of a parent a node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
