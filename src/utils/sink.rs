#![forbid(unsafe_code)]

use anyhow::Result;
use log::info;
use serde::Deserialize;
use uuid::Uuid;

// ***************************************************************************
//                             Form Submission
// ***************************************************************************
/** The three fields posted by the contact form. */
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormSubmission {
    /** The line written for this submission, all three fields included. */
    pub fn log_record(&self, id: &Uuid) -> String {
        format!("Form submitted [{}]: name={:?}, email={:?}, message={:?}",
                id, self.name, self.email, self.message)
    }
}

// ***************************************************************************
//                                  Traits
// ***************************************************************************
/** Destination of accepted form submissions. */
pub trait SubmissionSink: Send + Sync {
    fn record(&self, id: &Uuid, submission: &FormSubmission) -> Result<()>;
}

// ---------------------------------------------------------------------------
// LogSink:
// ---------------------------------------------------------------------------
/** Writes each submission as a single info record. */
#[derive(Debug, Default)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn record(&self, id: &Uuid, submission: &FormSubmission) -> Result<()> {
        info!("{}", submission.log_record(id));
        Ok(())
    }
}
