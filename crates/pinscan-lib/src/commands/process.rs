use log::{info, warn};
use thiserror::Error;

use crate::domain::{AnalyzeError, ContentSource, EventReport, FetchError, analyze_workflow};
use crate::infrastructure::{EventError, QueueBatch, QueueRecord, decode_event};

/// Why a single queue record could not be turned into a report
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{path}: {source}")]
    Analyze {
        path: String,
        #[source]
        source: AnalyzeError,
    },
}

/// Result of processing a queue batch
#[derive(Debug, Default)]
pub struct ProcessSummary {
    pub processed: usize,
    pub failed: usize,
    pub reports: Vec<EventReport>,
}

/// Process every record of a batch. A failing record is logged and counted,
/// and processing continues with the next one.
pub fn run<S: ContentSource>(batch: &QueueBatch, source: &S) -> ProcessSummary {
    info!("Received event with {} records", batch.records.len());

    let mut summary = ProcessSummary::default();
    for record in &batch.records {
        match process_record(record, source) {
            Ok(report) => {
                summary.processed += 1;
                summary.reports.push(report);
            }
            Err(e) => {
                warn!("Error processing record: {e}");
                summary.failed += 1;
            }
        }
    }

    info!(
        "Processed {} record(s), {} failed",
        summary.processed, summary.failed
    );
    summary
}

/// Decode, fetch and analyze the workflow announced by one record.
///
/// # Errors
///
/// Returns [`RecordError`] for the first stage that fails.
pub fn process_record<S: ContentSource>(
    record: &QueueRecord,
    source: &S,
) -> Result<EventReport, RecordError> {
    let event = decode_event(record)?;
    info!(
        "Processing workflow: {} from {}",
        event.workflow_path, event.repository.full_name
    );

    let content = source.fetch(&event.content_location())?;

    let analysis = analyze_workflow(&content).map_err(|source| RecordError::Analyze {
        path: event.workflow_path.clone(),
        source,
    })?;

    Ok(EventReport::new(&event, analysis))
}
