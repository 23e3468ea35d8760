pub mod event;
pub mod github;
pub mod repo;
pub mod workflow;

pub use event::{EventError, QueueBatch, QueueRecord, decode_event, parse_batch};
pub use github::{GithubContents, GithubError};
pub use repo::{GITHUB_DIR, RepoError, WORKFLOWS_DIR, find_root};
pub use workflow::{FileWorkflowScanner, ScanOutcome, ScannedWorkflow, WorkflowError};
