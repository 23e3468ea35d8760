use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{AnalyzeError, WorkflowReport, analyze_workflow};

/// Errors that can occur when analyzing a single file
#[derive(Debug, Error)]
pub enum AnalyzeFileError {
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

/// Analyze one workflow file, wherever it lives.
///
/// # Errors
///
/// Returns [`AnalyzeFileError::Read`] if the file cannot be read.
/// Returns [`AnalyzeFileError::Analyze`] if the file is not an analyzable workflow.
pub fn run(path: &Path) -> Result<WorkflowReport, AnalyzeFileError> {
    let content = fs::read_to_string(path).map_err(|source| AnalyzeFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let analysis = analyze_workflow(&content).map_err(|source| AnalyzeFileError::Analyze {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(WorkflowReport {
        path: path.display().to_string(),
        analysis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&dir.path().join("missing.yml")).unwrap_err();
        assert!(matches!(err, AnalyzeFileError::Read { .. }));
    }

    #[test]
    fn sequence_root_is_analyze_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.yml");
        fs::write(&path, "- a\n- b\n").unwrap();

        let err = run(&path).unwrap_err();
        assert!(matches!(
            err,
            AnalyzeFileError::Analyze {
                source: AnalyzeError::InvalidShape(_),
                ..
            }
        ));
    }

    #[test]
    fn report_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ci.yml");
        fs::write(&path, "name: CI\njobs:\n  a:\n    runs-on: ubuntu-latest\n").unwrap();

        let report = run(&path).unwrap();
        assert_eq!(report.path, path.display().to_string());
        assert_eq!(report.analysis.declared_name.as_deref(), Some("CI"));
    }
}
