use glob::glob;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::repo::WORKFLOWS_DIR;
use crate::domain::{AnalysisResult, AnalyzeError, analyze_workflow};

/// Errors that can occur when reading workflow files
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("failed to read glob pattern")]
    Glob(#[from] glob::PatternError),

    #[error("failed to read workflow: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to analyze workflow: {}", path.display())]
    Analyze {
        path: PathBuf,
        #[source]
        source: AnalyzeError,
    },
}

/// A workflow file and the dependencies found in it
#[derive(Debug, Clone)]
pub struct ScannedWorkflow {
    /// Path relative to the repository root when possible
    pub path: PathBuf,
    pub analysis: AnalysisResult,
}

/// Outcome of scanning every workflow in a repository
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub workflows: Vec<ScannedWorkflow>,
    /// Files that could not be read or analyzed
    pub failures: Vec<WorkflowError>,
}

/// Scanner for the workflow files of a local repository
pub struct FileWorkflowScanner {
    repo_root: PathBuf,
    workflows_dir: PathBuf,
}

impl FileWorkflowScanner {
    #[must_use]
    pub fn new(repo_root: &Path) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            workflows_dir: repo_root.join(WORKFLOWS_DIR),
        }
    }

    /// Find all workflow files in the repository's `.github/workflows` folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the glob pattern is invalid.
    pub fn find_workflows(&self) -> Result<Vec<PathBuf>, WorkflowError> {
        let mut workflows = Vec::new();

        for extension in &["yml", "yaml"] {
            let pattern = self
                .workflows_dir
                .join(format!("*.{extension}"))
                .to_string_lossy()
                .to_string();

            for entry in glob(&pattern)? {
                match entry {
                    Ok(path) => workflows.push(path),
                    Err(e) => warn!("Error reading path: {e}"),
                }
            }
        }

        workflows.sort();
        Ok(workflows)
    }

    /// Read and analyze a single workflow file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not an analyzable workflow.
    pub fn scan(&self, workflow_path: &Path) -> Result<ScannedWorkflow, WorkflowError> {
        let content = fs::read_to_string(workflow_path).map_err(|source| WorkflowError::Read {
            path: workflow_path.to_path_buf(),
            source,
        })?;

        let analysis = analyze_workflow(&content).map_err(|source| WorkflowError::Analyze {
            path: workflow_path.to_path_buf(),
            source,
        })?;

        let path = workflow_path
            .strip_prefix(&self.repo_root)
            .unwrap_or(workflow_path)
            .to_path_buf();

        Ok(ScannedWorkflow { path, analysis })
    }

    /// Scan all workflows. A file that fails is recorded and the rest are still scanned.
    ///
    /// # Errors
    ///
    /// Returns an error only if the workflow directory cannot be listed.
    pub fn scan_all(&self) -> Result<ScanOutcome, WorkflowError> {
        let workflows = self.find_workflows()?;
        if workflows.is_empty() {
            info!("No workflows found in .github/workflows/");
            return Ok(ScanOutcome::default());
        }

        debug!("Scanning workflows...");
        let mut outcome = ScanOutcome::default();
        for workflow in &workflows {
            debug!("{}", workflow.display());
            match self.scan(workflow) {
                Ok(scanned) => outcome.workflows.push(scanned),
                Err(e) => {
                    warn!("{e}");
                    outcome.failures.push(e);
                }
            }
        }
        Ok(outcome)
    }
}
