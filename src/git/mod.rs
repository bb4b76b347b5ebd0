// Git module providing read-only queries and staging against the `git` CLI.
//
// The exact textual formats used here (field separators, date pattern) are an
// internal contract between this module and the views; nothing outside the
// crate sees them.

pub mod history;
pub mod snapshot;

pub use history::{HistoryEntry, recent_commits};
pub use snapshot::{
    FileChange, FileStatus, RemoteEndpoint, RemoteRole, RepoIdentity, RepoSnapshot, capture,
};
