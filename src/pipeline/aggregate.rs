use serde::{Deserialize, Serialize};

use crate::api::{Event, FactCheckResult};

/// Cumulative analysis output reconstructed from streamed events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultAggregate {
    pub claims: Vec<String>,
    pub queries: Vec<String>,
    pub evidence: String,
    pub report: Vec<FactCheckResult>,
    /// The rewritten, verified text
    #[serde(rename = "final")]
    pub final_text: String,
}

impl ResultAggregate {
    /// Merge one event into the aggregate.
    ///
    /// Every merge replaces a single field wholesale; the service sends each
    /// event type with a complete payload, not deltas.
    pub fn merge(&mut self, event: &Event) {
        match event {
            Event::Claims(claims) => self.claims = claims.clone(),
            Event::Queries(queries) => self.queries = queries.clone(),
            Event::Evidence(text) => self.evidence = text.clone(),
            Event::Report(results) => self.report = results.clone(),
            Event::Final(text) => self.final_text = text.clone(),
            Event::Other { .. } => {}
        }
    }
}
