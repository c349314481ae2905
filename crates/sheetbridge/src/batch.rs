//! Running every stored job

use crate::config::{ConfigError, ConfigStore, ConfigurationRecord, RecordId, StoredRecord};
use crate::error::{SyncError, SyncResult};
use crate::job::{run_job, JobSummary};

/// Result of one job in a batch
#[derive(Debug)]
pub struct JobOutcome {
    pub id: RecordId,
    pub anchor: String,
    pub result: SyncResult<JobSummary>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-job outcomes of a batch run, in store order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<JobOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Jobs that completed but wrote placeholder cells
    pub fn degraded(&self) -> impl Iterator<Item = (&JobOutcome, &str)> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.result {
            Ok(JobSummary {
                degraded: Some(reason),
                ..
            }) => Some((outcome, reason.as_str())),
            _ => None,
        })
    }

    /// The failed jobs with their errors
    pub fn failures(&self) -> impl Iterator<Item = (&JobOutcome, &SyncError)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err().map(|err| (outcome, err)))
    }
}

/// Run every job in the store
///
/// A failing job is logged and recorded; the batch always moves on to the
/// next record. Only a store that cannot be listed stops the run.
pub fn run_batch(store: &dyn ConfigStore) -> Result<BatchReport, ConfigError> {
    Ok(run_records(store.list()?, run_job))
}

/// Run a list of records through `run`, collecting one outcome per record
pub fn run_records<F>(records: Vec<StoredRecord>, mut run: F) -> BatchReport
where
    F: FnMut(&ConfigurationRecord) -> SyncResult<JobSummary>,
{
    let mut report = BatchReport::default();
    for StoredRecord { id, record } in records {
        log::info!("job {}: '{}'", id, record.anchor);
        let result = run(&record);
        match &result {
            Ok(summary) => log::info!("job {} done ({} rows)", id, summary.rows),
            Err(err) => log::error!("job {} failed: {}", id, err),
        }
        report.outcomes.push(JobOutcome {
            id,
            anchor: record.anchor,
            result,
        });
    }
    report
}
