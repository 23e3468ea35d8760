use thiserror::Error;

use super::analysis::AnalysisResult;
use super::classify::{action_dependency, container_dependency, runner_dependencies};
use super::document::Node;

/// Errors that prevent a workflow document from being analyzed at all
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    /// The text is not valid YAML.
    #[error("invalid YAML: {0}")]
    MalformedDocument(String),

    /// The YAML is valid but its root is not a mapping.
    #[error("workflow must be a YAML mapping, found {0}")]
    InvalidShape(String),
}

/// Parse raw workflow text into a document tree whose root is a mapping.
///
/// # Errors
///
/// Returns [`AnalyzeError::MalformedDocument`] if the text is not valid YAML.
/// Returns [`AnalyzeError::InvalidShape`] if the root is not a mapping, including
/// documents that are empty or only contain comments.
pub fn parse_document(content: &str) -> Result<Node, AnalyzeError> {
    if is_blank(content) {
        return Err(AnalyzeError::InvalidShape("an empty document".to_string()));
    }

    let root: Node = serde_saphyr::from_str_with_options(content, yaml_options())
        .map_err(|e| AnalyzeError::MalformedDocument(e.to_string()))?;

    match root {
        Node::Mapping(_) => Ok(root),
        Node::String(_) | Node::Sequence(_) | Node::Scalar(_) => {
            Err(AnalyzeError::InvalidShape(root.shape().to_string()))
        }
    }
}

/// Parser options: a repeated mapping key is accepted and the last value wins.
pub(crate) fn yaml_options() -> serde_saphyr::Options {
    serde_saphyr::options! {
        duplicate_keys: serde_saphyr::DuplicateKeyPolicy::LastWins,
    }
}

/// True when the text has no YAML content besides whitespace and comments.
fn is_blank(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

/// Extract the external dependencies of a workflow.
///
/// Malformed parts of an otherwise valid document are skipped: a job that is
/// not a mapping, a step that is not a mapping, or a field of the wrong type
/// never aborts the analysis.
///
/// # Errors
///
/// Returns an [`AnalyzeError`] only when the document as a whole cannot be
/// understood. See [`parse_document`].
pub fn analyze_workflow(content: &str) -> Result<AnalysisResult, AnalyzeError> {
    let workflow = parse_document(content)?;

    let mut result = AnalysisResult {
        declared_name: workflow
            .get("name")
            .and_then(Node::as_str)
            .map(str::to_string),
        ..AnalysisResult::default()
    };

    let jobs = workflow
        .get("jobs")
        .and_then(Node::as_mapping)
        .unwrap_or_default();

    for (job_id, job) in jobs {
        if job.as_mapping().is_none() {
            continue;
        }
        result.job_identifiers.push(job_id.clone());
        walk_job(job, &mut result);
    }

    Ok(result)
}

/// Append one job's dependencies: runners, then container, then steps.
fn walk_job(job: &Node, result: &mut AnalysisResult) {
    if let Some(runs_on) = job.get("runs-on") {
        result.dependencies.extend(runner_dependencies(runs_on));
    }

    if let Some(container) = job.get("container").and_then(container_dependency) {
        result.dependencies.push(container);
    }

    let steps = job
        .get("steps")
        .and_then(Node::as_sequence)
        .unwrap_or_default();
    result.total_steps += steps.len();

    let actions = steps
        .iter()
        .filter_map(|step| step.get("uses"))
        .filter_map(Node::as_str)
        .filter_map(action_dependency);
    result.dependencies.extend(actions);
}
