use anyhow::{bail, Context as _, Result};

use crate::editor;
use crate::git;

use super::{choose, display_items, Context};

/// `arbor open [query]`: pick a worktree and open it in an editor.
pub fn run(ctx: &Context, query: Option<&str>, preferred_editor: Option<&str>) -> Result<()> {
    let worktrees = git::list_worktrees(&ctx.git).context("failed to get worktrees")?;
    if worktrees.is_empty() {
        bail!("no worktrees found");
    }

    let items = display_items(&worktrees);
    let index = choose(
        &items,
        query.unwrap_or(""),
        "Select worktree to open",
        false,
    )?;
    let selected = &worktrees[index];

    let editor_path = editor::find_editor(preferred_editor)?;
    if !ctx.quiet {
        println!(
            "Opening {} with '{}'...",
            selected.path.display(),
            editor_path.display()
        );
    }
    editor::open_in_editor(&selected.path, &editor_path)
}
