use crate::db::api::LogEntry;
use crate::models::{AlertGate, Verdict, VerdictLabel};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Verdicts seen during one running session, in arrival order.
#[derive(Debug)]
pub struct DetectionHistory {
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    verdicts: Vec<Verdict>,
}

impl Default for DetectionHistory {
    fn default() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            verdicts: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionSummary {
    pub duration_secs: i64,
    pub total_claims: usize,
    pub bullshit_claims: usize,
    pub verified_claims: usize,
    pub searches_performed: usize,
}

impl SessionSummary {
    pub fn bullshit_pct(&self) -> f64 {
        pct(self.bullshit_claims, self.total_claims)
    }

    pub fn verified_pct(&self) -> f64 {
        pct(self.verified_claims, self.total_claims)
    }
}

fn pct(part: usize, total: usize) -> f64 {
    part as f64 / total.max(1) as f64 * 100.0
}

impl DetectionHistory {
    /// Rebuild a finished session from its verdict log.
    pub fn replay(entries: Vec<LogEntry>) -> Self {
        let started_at = entries.first().map(|e| e.timestamp.0).unwrap_or_else(Utc::now);
        let finished_at = entries.last().map(|e| e.timestamp.0);
        Self {
            started_at,
            finished_at,
            verdicts: entries.into_iter().map(|e| e.result).collect(),
        }
    }

    pub fn push(&mut self, verdict: Verdict) {
        self.verdicts.push(verdict);
    }

    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    pub fn summary(&self, gate: &AlertGate, searches_performed: usize) -> SessionSummary {
        SessionSummary {
            duration_secs: (self.finished_at.unwrap_or_else(Utc::now) - self.started_at)
                .num_seconds(),
            total_claims: self.verdicts.len(),
            bullshit_claims: self
                .verdicts
                .iter()
                .filter(|v| gate.should_alert(v.bullshit_score))
                .count(),
            verified_claims: self
                .verdicts
                .iter()
                .filter(|v| v.label == VerdictLabel::True)
                .count(),
            searches_performed,
        }
    }
}
