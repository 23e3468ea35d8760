use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::analysis::AnalysisResult;
use super::event::WorkflowEvent;

/// Event metadata carried into a report. Labels the analysis only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub repository: String,
    pub workflow_path: String,
    pub commit_sha: String,
    pub commit_author: String,
    pub event_type: String,
    pub timestamp: String,
}

impl From<&WorkflowEvent> for EventSummary {
    fn from(event: &WorkflowEvent) -> Self {
        Self {
            repository: event.repository.full_name.clone(),
            workflow_path: event.workflow_path.clone(),
            commit_sha: event.commit.sha.clone(),
            commit_author: event.commit.author.clone(),
            event_type: event.event_type.clone(),
            timestamp: event.timestamp.clone(),
        }
    }
}

/// Analysis of a workflow announced on the event queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventReport {
    pub event: EventSummary,
    pub analysis: AnalysisResult,
    /// RFC 3339 UTC time at which the analysis was produced
    pub analyzed_at: String,
}

impl EventReport {
    #[must_use]
    pub fn new(event: &WorkflowEvent, analysis: AnalysisResult) -> Self {
        Self {
            event: EventSummary::from(event),
            analysis,
            analyzed_at: now_rfc3339(),
        }
    }
}

/// Analysis of a workflow file read from disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowReport {
    pub path: String,
    pub analysis: AnalysisResult,
}

/// Current UTC time in RFC 3339 format. Falls back to the Unix timestamp if the
/// clock value cannot be formatted.
fn now_rfc3339() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyzed_at_is_rfc3339() {
        let stamp = now_rfc3339();
        assert!(OffsetDateTime::parse(&stamp, &Rfc3339).is_ok(), "{stamp}");
    }

    #[test]
    fn workflow_report_serializes_path_and_analysis() {
        let report = WorkflowReport {
            path: ".github/workflows/ci.yml".to_string(),
            analysis: AnalysisResult::default(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["path"], ".github/workflows/ci.yml");
        assert_eq!(json["analysis"]["total_steps"], 0);
    }
}
