pub mod app;
pub mod cache;
pub mod config;
pub mod exec;
pub mod git;
pub mod prompt;
pub mod templates;
pub mod ui;
pub mod views;
pub mod workflow;

// Re-export important structs and functions for easier testing
pub use cache::TtlCache;
pub use config::{Settings, SettingsStore};
pub use exec::{CommandRunner, ProcessRunner};
pub use git::{FileChange, FileStatus, RepoSnapshot, capture};
pub use workflow::{AbortReason, CommitWorkflow, Outcome};
