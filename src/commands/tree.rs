//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which accumulates a
//! build target and displays the resulting directory tree: every
//! directory participating in the build, rooted at the common top, with
//! the files each one contributes.
//!
//! This command is a safe, read-only operation that does not stage or
//! render anything.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ptree::{print_tree, TreeItem};

use substage::accumulate::accumulate;
use substage::output::{self, Status};
use substage::target::TargetRef;

/// Display the accumulated directory tree for a target
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Directory containing the kustomization to accumulate
    #[arg(value_name = "DIR", default_value = ".")]
    pub target: PathBuf,
}

/// Execute the `tree` command.
///
/// Accumulates the target the same way a build would, then prints the
/// tree from its topmost ancestor without staging any files.
pub fn execute(args: TreeArgs, status: &Status) -> Result<()> {
    let tree = accumulate(&args.target)
        .with_context(|| format!("can't accumulate '{}'", args.target.display()))?;

    println!(
        "{} Build tree for: {}",
        status.marker(output::TREE),
        args.target.display()
    );

    let top = tree.top();
    let root = build_tree_node(top, top.borrow().root().display().to_string());
    print_tree(&root).context("can't display the tree")?;

    Ok(())
}

/// Project a target and its descendants into displayable nodes: the
/// directory's files first, then its subdirectories.
fn build_tree_node(target: &TargetRef, label: String) -> TreeNode {
    let node = target.borrow();

    let mut children: Vec<TreeNode> = node
        .files()
        .iter()
        .map(|file| TreeNode {
            label: file.display().to_string(),
            children: vec![],
        })
        .collect();

    children.extend(
        node.children()
            .iter()
            .map(|(segment, child)| build_tree_node(child, format!("{}/", segment))),
    );

    TreeNode { label, children }
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
