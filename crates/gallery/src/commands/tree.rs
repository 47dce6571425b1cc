//! `gallery tree` command implementation.
//!
//! Prints the assembled navigation tree. Deferred subtrees stay
//! unevaluated and are marked as such unless `--resolve` walks them
//! through the router.

use clap::Args;
use gallery_nav::{NavNode, RouteValue};

use crate::commands::{ProjectArgs, load_gallery};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Evaluate deferred subtrees instead of marking them.
    #[arg(long)]
    resolve: bool,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error when the gallery fails to load, or when
    /// `--resolve` hits a failing deferred subtree.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (_config, gallery) = load_gallery(&self.project, &output).await?;

        output.separator();
        if self.resolve {
            print_resolved(&output, gallery.router()).await?;
        } else {
            print_static(&output, "/", gallery.router().root(), 0);
        }
        Ok(())
    }
}

/// Walk the in-memory tree; deferred subtrees are marked, not evaluated.
fn print_static(output: &Output, segment: &str, node: &NavNode, depth: usize) {
    output.info(&format!("{}{segment}  {}", "  ".repeat(depth), node.name));
    for (child_segment, value) in node.routes.iter() {
        match value {
            RouteValue::Resolved(child) => print_static(output, child_segment, child, depth + 1),
            RouteValue::Deferred(_) => {
                output.muted(&format!(
                    "{}{child_segment}  (deferred)",
                    "  ".repeat(depth + 1)
                ));
            }
        }
    }
}

/// Walk through the router so deferred subtrees get evaluated.
async fn print_resolved(output: &Output, router: &gallery_nav::Router) -> Result<(), CliError> {
    let mut stack = vec![(String::new(), 0usize)];
    while let Some((path, depth)) = stack.pop() {
        let page = router.resolve(&path).await?;
        let segment = match path.rfind('/') {
            Some(idx) => &path[idx..],
            None => "/",
        };
        output.info(&format!("{}{segment}  {}", "  ".repeat(depth), page.name));
        for child in page.children.iter().rev() {
            stack.push((format!("{path}{child}"), depth + 1));
        }
    }
    Ok(())
}
