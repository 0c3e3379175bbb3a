use serde::{Deserialize, Serialize};

use crate::api::Event;

/// Progress status of one pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Pending,
    Active,
    Completed,
}

/// One step of the verification pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub description: String,
    pub status: StageStatus,
    /// Whether a consumer should render an activity indicator for this stage
    pub show_progress: bool,
}

impl Stage {
    fn pending(name: &str, description: &str, show_progress: bool) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            status: StageStatus::Pending,
            show_progress,
        }
    }
}

/// Fixed ordered stage list advanced by incoming events.
///
/// The stage count is arbitrary by construction; the fact-check pipeline
/// uses three. Reapplying a transition is a no-op, and forward-only
/// progression is a property of the event order the service emits, not an
/// assertion made here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StagePipeline {
    stages: Vec<Stage>,
}

impl StagePipeline {
    /// The three-stage fact-check pipeline: extraction, research,
    /// verification.
    pub fn fact_check() -> Self {
        Self {
            stages: vec![
                Stage::pending(
                    "Extracting Claims",
                    "Identifying factual claims from your text",
                    false,
                ),
                Stage::pending("Researching", "Searching for reliable sources", true),
                Stage::pending("Verifying", "Cross-referencing evidence", true),
            ],
        }
    }

    /// The ordered stage list
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Reset every stage to pending for a new session.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.status = StageStatus::Pending;
        }
    }

    /// Advance stage statuses for one event.
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::Claims(_) => {
                self.set(0, StageStatus::Completed);
                self.set(1, StageStatus::Active);
            }
            Event::Evidence(_) => {
                self.set(1, StageStatus::Completed);
                self.set(2, StageStatus::Active);
            }
            Event::Report(_) => {
                self.set(2, StageStatus::Completed);
            }
            Event::Queries(_) | Event::Final(_) | Event::Other { .. } => {}
        }
    }

    fn set(&mut self, index: usize, status: StageStatus) {
        if let Some(stage) = self.stages.get_mut(index) {
            stage.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(pipeline: &StagePipeline) -> Vec<StageStatus> {
        pipeline.stages().iter().map(|s| s.status).collect()
    }

    #[test]
    fn test_fresh_pipeline_is_all_pending() {
        let pipeline = StagePipeline::fact_check();
        assert_eq!(
            statuses(&pipeline),
            vec![
                StageStatus::Pending,
                StageStatus::Pending,
                StageStatus::Pending
            ]
        );
        assert!(!pipeline.stages()[0].show_progress);
        assert!(pipeline.stages()[1].show_progress);
    }

    #[test]
    fn test_claims_completes_extraction_and_activates_research() {
        let mut pipeline = StagePipeline::fact_check();
        pipeline.apply(&Event::Claims(vec!["a".to_string()]));
        assert_eq!(
            statuses(&pipeline),
            vec![
                StageStatus::Completed,
                StageStatus::Active,
                StageStatus::Pending
            ]
        );
    }

    #[test]
    fn test_evidence_completes_research_and_activates_verification() {
        let mut pipeline = StagePipeline::fact_check();
        pipeline.apply(&Event::Claims(vec![]));
        pipeline.apply(&Event::Evidence("snippets".to_string()));
        assert_eq!(
            statuses(&pipeline),
            vec![
                StageStatus::Completed,
                StageStatus::Completed,
                StageStatus::Active
            ]
        );
    }

    #[test]
    fn test_report_completes_verification() {
        let mut pipeline = StagePipeline::fact_check();
        pipeline.apply(&Event::Claims(vec![]));
        pipeline.apply(&Event::Evidence(String::new()));
        pipeline.apply(&Event::Report(vec![]));
        assert_eq!(
            statuses(&pipeline),
            vec![
                StageStatus::Completed,
                StageStatus::Completed,
                StageStatus::Completed
            ]
        );
    }

    #[test]
    fn test_queries_final_and_unknown_leave_stages_alone() {
        let mut pipeline = StagePipeline::fact_check();
        pipeline.apply(&Event::Queries(vec!["q".to_string()]));
        pipeline.apply(&Event::Final("text".to_string()));
        pipeline.apply(&Event::Other {
            event_type: "progress".to_string(),
        });
        assert_eq!(
            statuses(&pipeline),
            vec![
                StageStatus::Pending,
                StageStatus::Pending,
                StageStatus::Pending
            ]
        );
    }

    #[test]
    fn test_transitions_are_idempotent() {
        let mut pipeline = StagePipeline::fact_check();
        pipeline.apply(&Event::Claims(vec![]));
        let after_first = pipeline.clone();
        pipeline.apply(&Event::Claims(vec![]));
        assert_eq!(pipeline, after_first);
    }

    #[test]
    fn test_reset_returns_all_stages_to_pending() {
        let mut pipeline = StagePipeline::fact_check();
        pipeline.apply(&Event::Claims(vec![]));
        pipeline.apply(&Event::Evidence(String::new()));
        pipeline.reset();
        assert_eq!(
            statuses(&pipeline),
            vec![
                StageStatus::Pending,
                StageStatus::Pending,
                StageStatus::Pending
            ]
        );
    }
}
