use std::path::Path;
use thiserror::Error;

use crate::config::Settings;
use crate::domain::WorkflowReport;
use crate::infrastructure::{
    EventError, GithubContents, GithubError, RepoError, WorkflowError, find_root, parse_batch,
};

use super::analyze::AnalyzeFileError;
use super::process::ProcessSummary;
use super::scan::ScanSummary;

/// Errors that can occur during command orchestration
#[derive(Debug, Error)]
pub enum AppError {
    /// A single workflow file could not be analyzed.
    #[error(transparent)]
    Analyze(#[from] AnalyzeFileError),

    /// The repository to scan could not be located.
    #[error(transparent)]
    Repo(#[from] RepoError),

    /// Workflow discovery failed.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// The queue batch could not be decoded.
    #[error(transparent)]
    Event(#[from] EventError),

    /// The Github client could not be created.
    #[error(transparent)]
    Github(#[from] GithubError),
}

/// Analyze a single workflow file.
///
/// # Errors
///
/// Returns [`AppError::Analyze`] if the file cannot be read or analyzed.
pub fn analyze(path: &Path) -> Result<WorkflowReport, AppError> {
    Ok(super::analyze::run(path)?)
}

/// Analyze all workflows of the repository containing `start`.
///
/// # Errors
///
/// Returns [`AppError::Repo`] if no repository with a `.github` folder is found.
/// Returns [`AppError::Workflow`] if the workflows cannot be listed.
pub fn scan(start: &Path) -> Result<ScanSummary, AppError> {
    let repo_root = find_root(start)?;
    Ok(super::scan::run(&repo_root)?)
}

/// Process a queue batch, fetching each workflow from Github.
///
/// The token is checked before any record is handled.
///
/// # Errors
///
/// Returns [`AppError::Github`] if no token is configured or the client cannot be created.
/// Returns [`AppError::Event`] if the batch document is not valid JSON.
pub fn process(batch_json: &str, settings: &Settings) -> Result<ProcessSummary, AppError> {
    if settings.github_token.is_none() {
        return Err(GithubError::TokenRequired.into());
    }

    let batch = parse_batch(batch_json)?;
    let source = GithubContents::from_settings(settings)?;

    Ok(super::process::run(&batch, &source))
}
