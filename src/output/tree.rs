//! Tree formatter for collected directory trees
//!
//! This module provides `TreeFormatter` which renders a `DirTree` into a
//! string or prints it with colors. Siblings are drawn largest first.

use std::io::{self, Write};

use termcolor::{ColorChoice, NoColor, StandardStream, WriteColor};

use crate::tree::{DirTree, NodeId, format_by_unit};

use super::config::OutputConfig;
use super::utils::{SIZE_SEPARATOR, connector, continuation_prefix, name_color, size_color};

/// Formatter for collected directory trees.
pub struct TreeFormatter {
    config: OutputConfig,
}

impl TreeFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render the tree as plain text.
    pub fn format(&self, tree: &DirTree) -> String {
        let mut out = NoColor::new(Vec::new());
        self.write_tree(tree, &mut out).expect("writing to a Vec cannot fail");
        String::from_utf8_lossy(&out.into_inner()).into_owned()
    }

    /// Print the tree to stdout, colored when the config asks for it.
    /// The caller has already resolved `--color auto` against the environment.
    pub fn print(&self, tree: &DirTree) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_tree(tree, &mut stdout)?;
        stdout.flush()
    }

    /// Write the whole tree, starting at the root.
    pub fn write_tree<W: WriteColor>(&self, tree: &DirTree, out: &mut W) -> io::Result<()> {
        self.write_node(tree, tree.root(), out, "", true)
    }

    /// Write `id` and everything below it.
    ///
    /// `prefix` is the indentation drawn before this node's connector and
    /// `is_last` tells whether it is the final sibling in display order.
    pub fn write_node<W: WriteColor>(
        &self,
        tree: &DirTree,
        id: NodeId,
        out: &mut W,
        prefix: &str,
        is_last: bool,
    ) -> io::Result<()> {
        let node = tree.node(id);

        write!(out, "{}{}", prefix, connector(is_last))?;
        out.set_color(&name_color())?;
        write!(out, "{}", node.name)?;
        out.reset()?;
        write!(out, "{}", SIZE_SEPARATOR)?;
        out.set_color(&size_color(node.incomplete))?;
        write!(out, "{}", format_by_unit(node.total_size))?;
        out.reset()?;
        writeln!(out)?;

        if self.config.at_max_depth(node.depth) {
            return Ok(());
        }

        let child_prefix = continuation_prefix(prefix, is_last);
        let children = tree.children_by_size(id);
        let count = children.len();

        for (i, child) in children.into_iter().enumerate() {
            let child_is_last = i + 1 == count;
            self.write_node(tree, child, out, &child_prefix, child_is_last)?;

            // Blank spacer after a trailing leaf
            if child_is_last && self.is_rendered_leaf(tree, child) {
                writeln!(out, "{}", child_prefix)?;
            }
        }

        Ok(())
    }

    /// A node is drawn as a leaf when it has no retained children or sits at
    /// the depth limit.
    fn is_rendered_leaf(&self, tree: &DirTree, id: NodeId) -> bool {
        !tree.has_children(id) || self.config.at_max_depth(tree.node(id).depth)
    }
}
