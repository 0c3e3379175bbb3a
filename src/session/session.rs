use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pipeline::{ResultAggregate, StagePipeline};

/// Lifecycle status of an analysis session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Running,
    Completed,
    Failed,
}

/// One complete analysis run, from request submission to terminal state.
///
/// Consumers receive this as an immutable snapshot per dispatch cycle; a new
/// invocation replaces the previous session wholesale, so no state carries
/// over between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub status: SessionStatus,
    pub stages: StagePipeline,
    pub result: ResultAggregate,
    /// Message of the fatal fault that failed the session, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Session {
    /// An idle session with every stage pending and an empty aggregate
    pub fn idle() -> Self {
        Self {
            id: Uuid::new_v4(),
            status: SessionStatus::Idle,
            stages: StagePipeline::fact_check(),
            result: ResultAggregate::default(),
            error: None,
            started_at: None,
            finished_at: None,
        }
    }

    /// A fresh running session for a new invocation
    pub fn begin() -> Self {
        Self {
            status: SessionStatus::Running,
            started_at: Some(Utc::now()),
            ..Self::idle()
        }
    }

    /// Whether the session is currently running
    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    /// Whether the session reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, SessionStatus::Completed | SessionStatus::Failed)
    }

    /// Mark the session completed.
    pub fn complete(&mut self) {
        self.status = SessionStatus::Completed;
        self.finished_at = Some(Utc::now());
    }

    /// Mark the session failed, recording the fault message.
    ///
    /// Stage and result state accumulated so far is retained for display.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = SessionStatus::Failed;
        self.error = Some(message.into());
        self.finished_at = Some(Utc::now());
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::idle()
    }
}
