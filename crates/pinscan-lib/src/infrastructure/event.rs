use serde::Deserialize;
use thiserror::Error;

use crate::domain::{CommitInfo, RepositoryRef, WorkflowEvent};

/// Errors that can occur when decoding queue messages
#[derive(Debug, Error)]
pub enum EventError {
    #[error("failed to decode queue batch")]
    Batch(#[source] serde_json::Error),

    #[error("failed to decode SNS envelope")]
    Envelope(#[source] serde_json::Error),

    #[error("failed to decode workflow event")]
    Message(#[source] serde_json::Error),
}

/// A batch of queue records as delivered to the processor
#[derive(Debug, Default, Deserialize)]
pub struct QueueBatch {
    #[serde(rename = "Records", default)]
    pub records: Vec<QueueRecord>,
}

/// A single queue record. Only the body is used.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueRecord {
    pub body: String,
}

/// SNS notifications wrap the event JSON in a string field
#[derive(Debug, Deserialize)]
struct SnsEnvelope {
    #[serde(rename = "Message")]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventMessage {
    repository: RepositoryMessage,
    workflow: WorkflowMessage,
    commit: CommitMessage,
    event_type: String,
    timestamp: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryMessage {
    owner: String,
    name: String,
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct WorkflowMessage {
    path: String,
    #[serde(rename = "ref")]
    git_ref: String,
}

#[derive(Debug, Deserialize)]
struct CommitMessage {
    sha: String,
    message: String,
    author: String,
}

impl From<EventMessage> for WorkflowEvent {
    fn from(msg: EventMessage) -> Self {
        Self {
            repository: RepositoryRef {
                owner: msg.repository.owner,
                name: msg.repository.name,
                full_name: msg.repository.full_name,
            },
            workflow_path: msg.workflow.path,
            workflow_ref: msg.workflow.git_ref,
            commit: CommitInfo {
                sha: msg.commit.sha,
                message: msg.commit.message,
                author: msg.commit.author,
            },
            event_type: msg.event_type,
            timestamp: msg.timestamp,
        }
    }
}

/// Parse a queue batch from JSON text.
///
/// # Errors
///
/// Returns [`EventError::Batch`] if the text is not a valid batch document.
pub fn parse_batch(content: &str) -> Result<QueueBatch, EventError> {
    serde_json::from_str(content).map_err(EventError::Batch)
}

/// Decode the workflow event carried by a queue record.
///
/// The body is either the event itself or an SNS envelope whose `Message`
/// holds the event as a JSON string.
///
/// # Errors
///
/// Returns [`EventError::Envelope`] if the body is not a JSON object.
/// Returns [`EventError::Message`] if the event is missing required fields.
pub fn decode_event(record: &QueueRecord) -> Result<WorkflowEvent, EventError> {
    let envelope: SnsEnvelope =
        serde_json::from_str(&record.body).map_err(EventError::Envelope)?;

    let payload = envelope.message.as_deref().unwrap_or(&record.body);
    let message: EventMessage = serde_json::from_str(payload).map_err(EventError::Message)?;

    Ok(WorkflowEvent::from(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENT_JSON: &str = r#"{
        "repository": {"owner": "octo", "name": "app", "fullName": "octo/app"},
        "workflow": {"path": ".github/workflows/ci.yml", "ref": "refs/heads/main"},
        "commit": {"sha": "8e8c483db84b4bee98b60c0593521ed34d9990e8", "message": "update ci", "author": "octocat"},
        "eventType": "push",
        "timestamp": "2024-05-01T12:00:00Z"
    }"#;

    fn record(body: &str) -> QueueRecord {
        QueueRecord {
            body: body.to_string(),
        }
    }

    #[test]
    fn decodes_raw_body() {
        let event = decode_event(&record(EVENT_JSON)).unwrap();

        assert_eq!(event.repository.owner, "octo");
        assert_eq!(event.repository.name, "app");
        assert_eq!(event.repository.full_name, "octo/app");
        assert_eq!(event.workflow_path, ".github/workflows/ci.yml");
        assert_eq!(event.workflow_ref, "refs/heads/main");
        assert_eq!(event.commit.author, "octocat");
        assert_eq!(event.event_type, "push");
    }

    #[test]
    fn decodes_sns_wrapped_body() {
        let envelope = serde_json::json!({
            "Type": "Notification",
            "Message": EVENT_JSON,
        })
        .to_string();

        let event = decode_event(&record(&envelope)).unwrap();
        assert_eq!(event.repository.full_name, "octo/app");
        assert_eq!(event.commit.sha, "8e8c483db84b4bee98b60c0593521ed34d9990e8");
    }

    #[test]
    fn missing_fields_fail() {
        let err = decode_event(&record(r#"{"repository": {"owner": "octo"}}"#)).unwrap_err();
        assert!(matches!(err, EventError::Message(_)));
    }

    #[test]
    fn non_json_body_fails() {
        let err = decode_event(&record("not json")).unwrap_err();
        assert!(matches!(err, EventError::Envelope(_)));
    }

    #[test]
    fn batch_without_records_is_empty() {
        let batch = parse_batch("{}").unwrap();
        assert!(batch.records.is_empty());
    }

    #[test]
    fn batch_with_records() {
        let batch = parse_batch(r#"{"Records": [{"body": "{}", "messageId": "1"}]}"#).unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].body, "{}");
    }
}
