use anyhow::{bail, Context as _, Result};

use crate::git;

use super::{choose, display_items, Context};

/// `arbor go [query]`: pick a worktree and print its path. The shell hook
/// turns the printed path into an actual `cd`.
pub fn run(
    ctx: &Context,
    query: Option<&str>,
    index: Option<usize>,
    no_picker: bool,
) -> Result<()> {
    let worktrees = git::list_worktrees(&ctx.git).context("failed to get worktrees")?;
    if worktrees.is_empty() {
        bail!("no worktrees found");
    }

    let items = display_items(&worktrees);
    let selected_index = match index {
        Some(i) => {
            if i >= worktrees.len() {
                bail!("index out of range: {i} (max: {})", worktrees.len() - 1);
            }
            i
        }
        None => choose(&items, query.unwrap_or(""), "Select worktree", no_picker)?,
    };

    let selected = &worktrees[selected_index];
    if ctx.quiet {
        println!("{}", selected.path.display());
    } else {
        println!("Destination: {}", selected.path.display());
        if atty::is(atty::Stream::Stdout) {
            println!();
            println!("Hint: install the shell function to actually change directory:");
            println!("  eval \"$(arbor hook bash)\"   # or zsh / fish");
        }
    }
    Ok(())
}
