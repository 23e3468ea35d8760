use log::{debug, info};
use std::path::Path;

use crate::domain::{PinningStrategy, WorkflowReport};
use crate::infrastructure::{FileWorkflowScanner, WorkflowError};

/// Reports for every analyzable workflow of a repository
#[derive(Debug, Default)]
pub struct ScanSummary {
    pub reports: Vec<WorkflowReport>,
    /// Number of workflow files that could not be read or analyzed
    pub failed: usize,
}

/// Analyze every workflow under `.github/workflows` of `repo_root`.
///
/// # Errors
///
/// Returns [`WorkflowError::Glob`] if the workflow directory cannot be listed.
pub fn run(repo_root: &Path) -> Result<ScanSummary, WorkflowError> {
    let outcome = FileWorkflowScanner::new(repo_root).scan_all()?;

    let reports: Vec<WorkflowReport> = outcome
        .workflows
        .into_iter()
        .map(|scanned| {
            let counts = scanned.analysis.pinning_counts();
            debug!(
                "{}: {} sha, {} tag, {} branch, {} unpinned",
                scanned.path.display(),
                counts[&PinningStrategy::Sha],
                counts[&PinningStrategy::Tag],
                counts[&PinningStrategy::Branch],
                counts[&PinningStrategy::Unpinned],
            );
            if !scanned.analysis.is_fully_pinned() {
                info!(
                    "{} references actions that are not pinned to a commit SHA",
                    scanned.path.display()
                );
            }
            WorkflowReport {
                path: scanned.path.display().to_string(),
                analysis: scanned.analysis,
            }
        })
        .collect();

    Ok(ScanSummary {
        reports,
        failed: outcome.failures.len(),
    })
}
