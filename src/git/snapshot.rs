//! Repository state aggregation
//!
//! [`capture`] reconciles several independent `git` command outputs into one
//! immutable [`RepoSnapshot`]: identity, remote endpoints, and the staged
//! change set. Capture is not a pure read: it stages the whole working tree
//! first, so the diff it reports is exactly what a subsequent commit would
//! record. The workflow wraps it in the TTL cache so staging runs once per
//! cache miss, never per hit.

use crate::exec::CommandRunner;
use log::{debug, warn};
use std::path::Path;

/// Who the committer is and where HEAD points. Sourced fresh on every capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentity {
    pub username: String,
    pub email: String,
    pub branch: String,
}

/// Direction of a remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteRole {
    Fetch,
    Push,
}

/// One resolved remote, or the synthesized `local` identity when no remote is
/// configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEndpoint {
    pub role: RemoteRole,
    pub owner: String,
    pub repo: String,
    pub url: String,
}

/// Coarse status of a staged file, from the first letter of the
/// `--name-status` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Modified,
    Added,
    Deleted,
    Other,
}

impl FileStatus {
    fn from_letter(letter: char) -> Self {
        match letter {
            'M' => Self::Modified,
            'A' => Self::Added,
            'D' => Self::Deleted,
            _ => Self::Other,
        }
    }
}

/// One staged file with its summed line counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub status: FileStatus,
    pub additions: u64,
    pub deletions: u64,
}

/// One immutable capture of identity, remotes, and the staged change set.
///
/// `changes` preserves the order paths were first observed in the diff
/// listing. A snapshot is never mutated in place; a fresh capture fully
/// replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSnapshot {
    pub identity: RepoIdentity,
    pub fetch: RemoteEndpoint,
    pub push: RemoteEndpoint,
    pub changes: Vec<FileChange>,
}

impl RepoSnapshot {
    /// Number of staged files with the given status.
    pub fn count_with_status(&self, status: FileStatus) -> usize {
        self.changes.iter().filter(|c| c.status == status).count()
    }
}

/// Captures the current repository state.
///
/// Side effect: stages all working-tree changes (`git add -A`) before reading
/// the diff. Zero staged changes yields an empty `changes` list, not an
/// error; the workflow decides whether that is fatal.
pub fn capture<R: CommandRunner + ?Sized>(runner: &R) -> RepoSnapshot {
    let username = runner.run("git", &["config", "user.name"]);
    let email = runner.run("git", &["config", "user.email"]);
    let branch = runner.run("git", &["symbolic-ref", "--short", "HEAD"]);
    debug!("Captured identity: {username} <{email}> on {branch}");

    let (fetch, push) = resolve_endpoints(runner);

    // Staging must happen before the diff is read so the listings reflect
    // exactly what will be committed.
    runner.run("git", &["add", "-A"]);

    let name_status = runner.run("git", &["diff", "--cached", "--name-status"]);
    let numstat = runner.run("git", &["diff", "--cached", "--numstat"]);
    let changes = merge_listings(&name_status, &numstat);
    debug!("Captured {} staged changes", changes.len());

    RepoSnapshot {
        identity: RepoIdentity {
            username,
            email,
            branch,
        },
        fetch,
        push,
        changes,
    }
}

/// Resolves the fetch and push endpoints of `origin`, or synthesizes `local`
/// endpoints named after the working tree's top-level directory when no
/// remote is configured.
fn resolve_endpoints<R: CommandRunner + ?Sized>(runner: &R) -> (RemoteEndpoint, RemoteEndpoint) {
    let fetch_url = runner.run("git", &["remote", "get-url", "origin"]);

    if fetch_url.is_empty() {
        let toplevel = runner.run("git", &["rev-parse", "--show-toplevel"]);
        let repo = Path::new(&toplevel)
            .file_name()
            .map_or_else(String::new, |name| name.to_string_lossy().into_owned());
        debug!("No remote configured, using local identity '{repo}'");

        let local = |role| RemoteEndpoint {
            role,
            owner: "local".to_string(),
            repo: repo.clone(),
            url: "local".to_string(),
        };
        return (local(RemoteRole::Fetch), local(RemoteRole::Push));
    }

    let push_url = runner.run("git", &["remote", "get-url", "--push", "origin"]);
    (
        endpoint_from_url(RemoteRole::Fetch, &fetch_url),
        endpoint_from_url(RemoteRole::Push, &push_url),
    )
}

/// Derives `{owner, repo}` from the last two `/`-delimited segments of a
/// remote URL, stripping a trailing `.git`.
fn endpoint_from_url(role: RemoteRole, url: &str) -> RemoteEndpoint {
    let mut segments = url.rsplit('/');
    let repo = segments
        .next()
        .unwrap_or_default()
        .trim_end_matches(".git")
        .to_string();
    let owner = segments.next().unwrap_or_default().to_string();

    RemoteEndpoint {
        role,
        owner,
        repo,
        url: url.to_string(),
    }
}

/// Merges the `--name-status` and `--numstat` listings of the staged diff
/// into one ordered change list keyed by path.
///
/// Both listings come from the same diff in the same order, but the merge is
/// keyed rather than positional so a reordering or divergence between the two
/// never mispairs counts. A path seen more than once sums its counts and
/// keeps the status of its first record. Non-numeric count markers (binary
/// files report `-`) normalize to zero.
fn merge_listings(name_status: &str, numstat: &str) -> Vec<FileChange> {
    let mut changes: Vec<FileChange> = Vec::new();

    for line in name_status.lines().filter(|l| !l.trim().is_empty()) {
        let mut fields = line.split('\t');
        let Some(status_field) = fields.next() else {
            continue;
        };
        // Renames carry two path fields; the last one is the staged path.
        let Some(path) = fields.next_back() else {
            warn!("Skipping malformed name-status record: {line:?}");
            continue;
        };

        let status = status_field
            .chars()
            .next()
            .map_or(FileStatus::Other, FileStatus::from_letter);

        if let Some(existing) = changes.iter_mut().find(|c| c.path == path) {
            // Duplicate record for the same path: status of the first record
            // wins, counts come from the numstat pass.
            debug!("Duplicate status record for {path}, keeping {:?}", existing.status);
        } else {
            changes.push(FileChange {
                path: path.to_string(),
                status,
                additions: 0,
                deletions: 0,
            });
        }
    }

    for line in numstat.lines().filter(|l| !l.trim().is_empty()) {
        let mut fields = line.split('\t');
        let (Some(adds), Some(dels), Some(path)) =
            (fields.next(), fields.next(), fields.next_back())
        else {
            warn!("Skipping malformed numstat record: {line:?}");
            continue;
        };

        let Some(change) = changes.iter_mut().find(|c| c.path == path) else {
            warn!("Numstat record for {path:?} has no status record, skipping");
            continue;
        };

        change.additions += parse_count(adds, path);
        change.deletions += parse_count(dels, path);
    }

    changes
}

/// Parses one numstat count field. `-` marks a file git cannot count (binary
/// content) and normalizes to zero, as does anything unparseable.
fn parse_count(field: &str, path: &str) -> u64 {
    if field == "-" {
        return 0;
    }
    field.parse().unwrap_or_else(|_| {
        warn!("Unparseable count {field:?} for {path}, treating as 0");
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Maps a rendered command line to canned stdout; anything unmapped
    /// behaves like a failed command (empty output).
    struct StubRunner {
        responses: HashMap<String, String>,
        calls: RefCell<Vec<String>>,
    }

    impl StubRunner {
        fn new(responses: &[(&str, &str)]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(cmd, out)| ((*cmd).to_string(), (*out).to_string()))
                    .collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for StubRunner {
        fn run(&self, program: &str, args: &[&str]) -> String {
            let rendered = format!("{program} {}", args.join(" "));
            self.calls.borrow_mut().push(rendered.clone());
            self.responses.get(&rendered).cloned().unwrap_or_default()
        }
    }

    #[test]
    fn duplicate_path_sums_counts_and_keeps_first_status() {
        let changes = merge_listings(
            "M\tsrc/lib.rs\nA\tsrc/lib.rs\n",
            "3\t1\tsrc/lib.rs\n2\t4\tsrc/lib.rs\n",
        );

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].status, FileStatus::Modified);
        assert_eq!(changes[0].additions, 5);
        assert_eq!(changes[0].deletions, 5);
    }

    #[test]
    fn binary_markers_normalize_to_zero() {
        let changes = merge_listings("A\tlogo.png\n", "-\t-\tlogo.png\n");

        assert_eq!(changes[0].additions, 0);
        assert_eq!(changes[0].deletions, 0);
        assert_eq!(changes[0].status, FileStatus::Added);
    }

    #[test]
    fn missing_numstat_record_does_not_panic() {
        let changes = merge_listings("M\ta.txt\nD\tb.txt\n", "1\t2\ta.txt\n");

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[1].path, "b.txt");
        assert_eq!(changes[1].additions, 0);
    }

    #[test]
    fn insertion_order_follows_status_listing() {
        let changes = merge_listings(
            "M\tzebra.rs\nA\talpha.rs\n",
            "1\t0\talpha.rs\n2\t0\tzebra.rs\n",
        );

        let paths: Vec<&str> = changes.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, ["zebra.rs", "alpha.rs"]);
        assert_eq!(changes[0].additions, 2);
        assert_eq!(changes[1].additions, 1);
    }

    #[test]
    fn rename_record_uses_staged_path() {
        let changes = merge_listings("R100\told.rs\tnew.rs\n", "0\t0\tnew.rs\n");

        assert_eq!(changes[0].path, "new.rs");
        assert_eq!(changes[0].status, FileStatus::Other);
    }

    #[test]
    fn endpoint_parses_owner_repo_and_strips_suffix() {
        let endpoint =
            endpoint_from_url(RemoteRole::Fetch, "https://github.com/acme/widgets.git");

        assert_eq!(endpoint.owner, "acme");
        assert_eq!(endpoint.repo, "widgets");
        assert_eq!(endpoint.url, "https://github.com/acme/widgets.git");
    }

    #[test]
    fn no_remote_collapses_to_local_identity() {
        let runner = StubRunner::new(&[
            ("git config user.name", "Ada"),
            ("git config user.email", "ada@example.com"),
            ("git symbolic-ref --short HEAD", "main"),
            ("git rev-parse --show-toplevel", "/home/ada/projects/widgets"),
        ]);

        let snapshot = capture(&runner);

        assert_eq!(snapshot.fetch.owner, "local");
        assert_eq!(snapshot.push.owner, "local");
        assert_eq!(snapshot.fetch.repo, "widgets");
        assert_eq!(snapshot.push.repo, "widgets");
    }

    #[test]
    fn capture_stages_before_reading_the_diff() {
        let runner = StubRunner::new(&[]);
        capture(&runner);

        let calls = runner.calls.borrow();
        let add = calls
            .iter()
            .position(|c| c == "git add -A")
            .expect("capture should stage everything");
        let diff = calls
            .iter()
            .position(|c| c.starts_with("git diff --cached"))
            .expect("capture should read the staged diff");
        assert!(add < diff);
    }

    #[test]
    fn fetch_and_push_urls_may_differ() {
        let runner = StubRunner::new(&[
            (
                "git remote get-url origin",
                "https://github.com/acme/widgets.git",
            ),
            (
                "git remote get-url --push origin",
                "https://github.com/forks/widgets.git",
            ),
        ]);

        let snapshot = capture(&runner);

        assert_eq!(snapshot.fetch.owner, "acme");
        assert_eq!(snapshot.push.owner, "forks");
        assert_eq!(snapshot.fetch.repo, snapshot.push.repo);
    }
}
