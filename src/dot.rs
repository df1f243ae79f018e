//! Graphviz rendering of the trees, enabled by the `graphviz` feature.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::avl::AvlTree;
use crate::index::{IndexType, NodeIndex};
use crate::node::Color;
use crate::rbtree::RbTree;
use crate::traverse::Tree;

/// Writes `tree` as a DOT digraph, styling each node with `style`.
fn render<T, W, F>(tree: &T, w: &mut W, style: F) -> io::Result<()>
where
    T: Tree,
    T::Key: Display,
    W: Write,
    F: Fn(NodeIndex<T::Ix>) -> &'static str,
{
    writeln!(w, "digraph {{")?;
    writeln!(w, "node [shape = circle; style = filled;];")?;
    let mut stack: Vec<_> = tree.root().into_iter().collect();
    while let Some(x) = stack.pop() {
        let id = x.index();
        writeln!(w, r#"n{id} [label="{}"; {}];"#, tree.key(x), style(x))?;
        for child in [tree.left(x), tree.right(x)] {
            match child {
                Some(c) => {
                    writeln!(w, "n{id} -> n{};", c.index())?;
                    stack.push(c);
                }
                None => {
                    writeln!(w, "nil_{id} [shape = point; style = invis;];")?;
                    writeln!(w, "n{id} -> nil_{id} [style = invis];")?;
                }
            }
        }
    }
    writeln!(w, "}}")
}

fn draw_to_file<T, F>(tree: &T, path: impl AsRef<Path>, style: F) -> io::Result<()>
where
    T: Tree,
    T::Key: Display,
    F: Fn(NodeIndex<T::Ix>) -> &'static str,
{
    let mut w = BufWriter::new(File::create(path)?);
    render(tree, &mut w, style)?;
    w.flush()
}

impl<K, Ix> AvlTree<K, Ix>
where
    K: Display,
    Ix: IndexType,
{
    /// Write the tree in DOT format to `w`.
    pub fn write_dot<W: Write>(&self, w: &mut W) -> io::Result<()> {
        render(self, w, |_| "fillcolor = white")
    }

    /// Write the tree in DOT format to the file at `path`.
    pub fn draw(&self, path: impl AsRef<Path>) -> io::Result<()> {
        draw_to_file(self, path, |_| "fillcolor = white")
    }
}

impl<K, Ix> RbTree<K, Ix>
where
    K: Display,
    Ix: IndexType,
{
    fn node_style(&self, x: NodeIndex<Ix>) -> &'static str {
        match self.color(x) {
            Color::Red => "fillcolor = red; fontcolor = white",
            Color::Black => "fillcolor = black; fontcolor = white",
        }
    }

    /// Write the tree in DOT format to `w`, coloring every node.
    pub fn write_dot<W: Write>(&self, w: &mut W) -> io::Result<()> {
        render(self, w, |x| self.node_style(x))
    }

    /// Write the tree in DOT format to the file at `path`.
    pub fn draw(&self, path: impl AsRef<Path>) -> io::Result<()> {
        draw_to_file(self, path, |x| self.node_style(x))
    }
}
