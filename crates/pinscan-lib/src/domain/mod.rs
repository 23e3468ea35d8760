pub mod analysis;
pub mod analyzer;
pub mod classify;
pub mod dependency;
pub mod document;
pub mod event;
pub mod report;
pub mod source;

pub use analysis::AnalysisResult;
pub use analyzer::{AnalyzeError, analyze_workflow, parse_document};
pub use classify::{action_dependency, container_dependency, pinning_strategy, runner_dependencies};
pub use dependency::{Dependency, DependencyKind, PinningStrategy};
pub use document::{Node, Scalar};
pub use event::{CommitInfo, ContentLocation, RepositoryRef, WorkflowEvent};
pub use report::{EventReport, EventSummary, WorkflowReport};
pub use source::{ContentSource, FetchError};
