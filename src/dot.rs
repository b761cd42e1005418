//! Graphviz rendering of a tree snapshot.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::index::{IndexType, NodeIndex};
use crate::iter::NodeRef;
use crate::rbtree::RbTree;

impl<K, C, Ix> RbTree<K, C, Ix>
where
    K: Display,
    Ix: IndexType,
{
    /// Write the tree as an undirected Graphviz graph, e.g. for `dot -Tx11`.
    ///
    /// Nodes are filled with their color. A node with at least one child gets
    /// a point-shaped placeholder for the missing one, so left and right stay
    /// apart in the picture.
    ///
    /// # Example
    /// ```rust
    /// use rbtree_arena::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(1);
    /// let mut out = Vec::new();
    /// tree.write_dot(&mut out).unwrap();
    /// let text = String::from_utf8(out).unwrap();
    /// assert!(text.contains("N1 [label=\"1\" color=black]"));
    /// ```
    pub fn write_dot<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "graph {{")?;
        writeln!(out, "node [fontcolor=cyan style=filled]")?;
        for node in self.preorder() {
            write_node(&mut out, node)?;
        }
        writeln!(out, "}}")?;
        out.flush()
    }

    /// Write the Graphviz rendering to `path`.
    pub fn draw(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let file = File::create(path)?;
        self.write_dot(BufWriter::new(file))
    }
}

fn write_node<W, K, Ix>(out: &mut W, node: NodeRef<'_, K, Ix>) -> io::Result<()>
where
    W: Write,
    K: Display,
    Ix: IndexType,
{
    let id = node.index().index();
    let color = if node.is_red() { "red" } else { "black" };
    writeln!(out, "N{id} [label=\"{}\" color={color}]", node.key())?;

    if node.left().is_none() && node.right().is_none() {
        return Ok(());
    }
    for (tag, child) in [("l", node.left()), ("r", node.right())] {
        match child.map(NodeIndex::index) {
            Some(child) => writeln!(out, "N{id} -- N{child}")?,
            None => {
                writeln!(out, "N{id} -- N{id}{tag}")?;
                writeln!(out, "N{id}{tag} [shape=point]")?;
            }
        }
    }
    Ok(())
}
