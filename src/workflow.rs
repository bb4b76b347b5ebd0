//! Commit workflow state machine
//!
//! Sequences `EnsureRepo → EnsureIgnoreFile → Display → Prompt → Commit →
//! PostDisplay`, aborting at the first failed precondition. The workflow owns
//! the snapshot cache explicitly; nothing here lives in ambient globals, so
//! every render reads from the same state the commit will use.

use crate::cache::TtlCache;
use crate::config::Settings;
use crate::exec::CommandRunner;
use crate::git::{self, RepoSnapshot};
use crate::prompt::Prompt;
use crate::templates::{TemplateFetcher, format_template_name};
use crate::{ui, views};
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::PathBuf;

/// Terminal result of one workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The commit was executed; the process should exit zero.
    Done,
    /// A precondition failed; the process should exit non-zero.
    Aborted(AbortReason),
}

/// Why the workflow stopped short of committing.
///
/// Every variant is fatal and expected: the operator sees one short
/// explanation, never a stack trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// No repository and the operator declined to initialize one.
    NoRepository,
    /// The named ignore-file template could not be fetched.
    TemplateFetch(String),
    /// Capture found nothing staged.
    NoStagedChanges,
    /// The collected commit message was empty or whitespace.
    EmptyMessage,
}

impl AbortReason {
    pub fn message(&self) -> String {
        match self {
            Self::NoRepository => {
                "This command can only be run from within a git repository.".to_string()
            }
            Self::TemplateFetch(name) => format!(
                "Error creating '.gitignore' from template '{name}'. \
                 Verify the template exists or create the file manually."
            ),
            Self::NoStagedChanges => "No changed files found. Cancelling commit.".to_string(),
            Self::EmptyMessage => "No message. Cancelling commit.".to_string(),
        }
    }
}

/// One interactive commit session.
pub struct CommitWorkflow<R, P, F> {
    runner: R,
    prompt: P,
    templates: F,
    settings: Settings,
    root: PathBuf,
    cache: TtlCache<(), RepoSnapshot>,
}

impl<R, P, F> CommitWorkflow<R, P, F>
where
    R: CommandRunner,
    P: Prompt,
    F: TemplateFetcher,
{
    pub fn new(runner: R, prompt: P, templates: F, settings: Settings, root: PathBuf) -> Self {
        let cache = TtlCache::new(settings.cache_ttl());
        Self {
            runner,
            prompt,
            templates,
            settings,
            root,
            cache,
        }
    }

    /// Drives the session to `Done` or the first abort.
    pub fn run(&mut self) -> Result<Outcome> {
        if let Some(reason) = self.ensure_repo()? {
            return Ok(Outcome::Aborted(reason));
        }
        if let Some(reason) = self.ensure_ignore_file()? {
            return Ok(Outcome::Aborted(reason));
        }

        let snapshot = self.display();
        if snapshot.changes.is_empty() {
            return Ok(Outcome::Aborted(AbortReason::NoStagedChanges));
        }

        ui::print_break();
        let message = self.prompt.multiline("\nCommit:")?;
        if message.trim().is_empty() {
            return Ok(Outcome::Aborted(AbortReason::EmptyMessage));
        }

        debug!("Committing {} staged files", snapshot.changes.len());
        self.runner.run("git", &["commit", "-m", message.trim()]);

        self.post_display(&snapshot);
        Ok(Outcome::Done)
    }

    /// `EnsureRepo`: offer to initialize when no repository is present.
    ///
    /// An empty `rev-parse` answer means either "no repository" or a broken
    /// git installation; the executor cannot tell them apart, so both lead to
    /// the same offer.
    fn ensure_repo(&self) -> Result<Option<AbortReason>> {
        if !self.runner.run("git", &["rev-parse", "--git-dir"]).is_empty() {
            return Ok(None);
        }

        if !self.prompt.confirm("Initialize a repository?", false)? {
            return Ok(Some(AbortReason::NoRepository));
        }

        self.runner
            .run("git", &["config", "--global", "init.defaultBranch", "main"]);
        self.runner.run("git", &["init"]);
        ui::print_dim("Repository initialized.");
        Ok(None)
    }

    /// `EnsureIgnoreFile`: seed `.gitignore` from the template catalog when
    /// it is missing. The fetched body is written verbatim.
    fn ensure_ignore_file(&self) -> Result<Option<AbortReason>> {
        let path = self.root.join(".gitignore");
        if path.exists() {
            return Ok(None);
        }

        let name = self.prompt.input("Use .gitignore template:", "Node")?;
        match self.templates.fetch(&name) {
            Ok(body) => {
                fs::write(&path, body)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                ui::print_dim(&format!(
                    "Template {} copied.",
                    format_template_name(&name, 20).trim_end()
                ));
                Ok(None)
            }
            Err(e) => {
                debug!("Template fetch failed: {e:#}");
                Ok(Some(AbortReason::TemplateFetch(name)))
            }
        }
    }

    /// `Display`: heading, history window, and changes window, all fed from
    /// one cached capture.
    fn display(&mut self) -> RepoSnapshot {
        let snapshot = self.capture_cached();

        if self.settings.heading_style > 0 {
            ui::print_message(&views::render_heading(&snapshot, self.settings.heading_style));
        }

        if self.settings.history_style > 0 {
            let entries =
                git::recent_commits(&self.runner, u32::from(self.settings.history_length));
            ui::print_break();
            ui::print_message(&views::render_history(&entries, self.settings.history_style));
        }

        if self.settings.changes_style > 0 {
            ui::print_break();
            ui::print_message(&views::render_changes(
                &snapshot,
                usize::from(self.settings.changes_length),
            ));
        }

        snapshot
    }

    /// `PostDisplay`: identity again, then the just-created commit from a
    /// fresh history query; the changed-files summary reflects the pre-commit
    /// snapshot, since the working tree is clean now.
    fn post_display(&self, committed: &RepoSnapshot) {
        let entries = git::recent_commits(&self.runner, u32::from(self.settings.final_length));

        ui::print_break();
        if self.settings.heading_style > 0 {
            ui::print_message(&views::render_heading(committed, self.settings.heading_style));
        }
        ui::print_message(&views::render_post_commit(entries.last(), committed));
        ui::print_newline();
    }

    fn capture_cached(&mut self) -> RepoSnapshot {
        let runner = &self.runner;
        self.cache.get_or_compute((), || git::capture(runner))
    }
}
