//! Snapshot rendering
//!
//! Pure data-shaping: every view renders to a `String` so the windowing and
//! tally rules can be asserted in tests without a terminal. The workflow
//! prints the results through [`crate::ui`].
//!
//! The original tool grew three near-identical drafts of these views; they
//! are collapsed here into single renderers with numeric style toggles
//! (0 suppresses a view, other values pick a layout).

use crate::git::{FileChange, FileStatus, HistoryEntry, RepoSnapshot};
use colored::Colorize;
use std::fmt::Write as _;

/// Identity plus fetch/push endpoint lines.
pub fn render_heading(snapshot: &RepoSnapshot, style: u8) -> String {
    if style == 0 {
        return String::new();
    }

    let identity = &snapshot.identity;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}  {}",
        identity.username.blue().bold(),
        identity.email.white().dimmed()
    );
    let _ = writeln!(
        out,
        " fetch << {}/{}/{}",
        snapshot.fetch.owner.blue(),
        snapshot.fetch.repo.white(),
        identity.branch.yellow()
    );
    let _ = write!(
        out,
        " push  >> {}/{}/{}",
        snapshot.push.owner.blue(),
        snapshot.push.repo.white(),
        identity.branch.yellow()
    );

    out
}

/// A bounded window of recent commits, oldest first.
///
/// Style 1 renders two lines per commit, style 2 a compact single line.
pub fn render_history(entries: &[HistoryEntry], style: u8) -> String {
    if style == 0 {
        return String::new();
    }

    let mut out = String::new();
    let _ = write!(
        out,
        "{}{}",
        "History:".blue().bold(),
        format!(" ({} commits)", entries.len()).white().dimmed()
    );

    for entry in entries {
        if style == 2 {
            let _ = write!(
                out,
                "\n {} {} {}",
                entry.hash.yellow(),
                entry.date.blue(),
                entry.subject
            );
        } else {
            let _ = write!(
                out,
                "\n {} {}{} {}\n   {}",
                entry.hash.yellow(),
                entry.date.blue(),
                format!(" {}", entry.relative_date).bright_black(),
                entry.author.green(),
                entry.subject
            );
        }
    }

    out
}

/// The first `window` staged changes in snapshot order, a `+K more` overflow
/// suffix, and the per-status tally.
pub fn render_changes(snapshot: &RepoSnapshot, window: usize) -> String {
    let changes = &snapshot.changes;
    let mut out = String::new();

    let _ = write!(
        out,
        "{}{}",
        "Changes:".blue().bold(),
        format!(" ({} files)", changes.len()).white().dimmed()
    );

    for change in changes.iter().take(window) {
        let _ = write!(out, "\n {}", render_change_line(change));
    }

    if changes.len() > window {
        let _ = write!(
            out,
            "\n    {}",
            format!("...+{} more", changes.len() - window).white().dimmed()
        );
    }

    let _ = write!(out, "\n {}", render_tally(snapshot).white().dimmed());
    out
}

/// Per-status tally, e.g. `1 changed, 1 added, 1 deleted`.
pub fn render_tally(snapshot: &RepoSnapshot) -> String {
    format!(
        "{} changed, {} added, {} deleted",
        snapshot.count_with_status(FileStatus::Modified),
        snapshot.count_with_status(FileStatus::Added),
        snapshot.count_with_status(FileStatus::Deleted)
    )
}

/// Post-commit view: the just-created commit plus a summary of what went
/// into it (from the last pre-commit snapshot, since the tree is now clean).
pub fn render_post_commit(latest: Option<&HistoryEntry>, committed: &RepoSnapshot) -> String {
    let mut out = String::new();

    let _ = write!(out, "{}", "Committed:".blue().bold());
    if let Some(entry) = latest {
        let _ = write!(
            out,
            "\n {} {} {}",
            entry.hash.yellow(),
            entry.date.blue(),
            entry.subject
        );
    }
    let _ = write!(
        out,
        "\n {}",
        format!(
            "{} files: {}",
            committed.changes.len(),
            render_tally(committed)
        )
        .white()
        .dimmed()
    );

    out
}

fn render_change_line(change: &FileChange) -> String {
    let marker = match change.status {
        FileStatus::Modified => "~".yellow().bold(),
        FileStatus::Added => "+".green().bold(),
        FileStatus::Deleted => "-".red().bold(),
        FileStatus::Other => "*".white().bold(),
    };

    format!(
        "{marker} {} {}",
        change.path,
        format!("+{}/-{}", change.additions, change.deletions)
            .white()
            .dimmed()
    )
}
