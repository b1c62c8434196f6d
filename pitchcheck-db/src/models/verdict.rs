use crate::models::{AnalysisMethod, Id, IsoDateTime, VerdictLabel};
use serde::{Deserialize, Serialize};

/// A source the remote model reported consulting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub url: String,
    pub title: String,
    /// The slice of the model reply the citation is attached to.
    #[serde(default)]
    pub used_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CitationRecord {
    pub timestamp: IsoDateTime,
    pub claim: String,
    pub citations: Vec<Citation>,
}

/// The structured outcome of checking one claim.
///
/// `bullshit_score` is always oriented so that higher means more likely false,
/// whatever the producing path reported as raw confidence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Verdict {
    pub id: Id,
    pub claim: String,
    #[serde(rename = "overall_verdict")]
    pub label: VerdictLabel,
    pub bullshit_score: f32,
    pub confidence: f32,
    pub explanation: String,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub reality_check: String,
    pub voice_response: String,
    pub should_interrupt: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullshit_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub citations: Vec<Citation>,
    pub analysis_method: AnalysisMethod,
    pub timestamp: IsoDateTime,
}

impl Verdict {
    pub fn new(
        claim: &str,
        label: VerdictLabel,
        bullshit_score: f32,
        analysis_method: AnalysisMethod,
    ) -> Self {
        Self {
            id: Id::new(),
            claim: claim.to_string(),
            label,
            bullshit_score: clamp_unit(bullshit_score),
            confidence: 0.5,
            explanation: String::new(),
            red_flags: Vec::new(),
            reality_check: String::new(),
            voice_response: String::new(),
            should_interrupt: false,
            bullshit_type: None,
            severity: None,
            sources: Vec::new(),
            citations: Vec::new(),
            analysis_method,
            timestamp: IsoDateTime::now(),
        }
    }
}

/// Clamp into [0, 1]; NaN collapses to the neutral midpoint.
pub fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.5
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_serializes_overall_verdict_key() {
        let v = Verdict::new("claim", VerdictLabel::False, 1.4, AnalysisMethod::LlmText);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["overall_verdict"], "FALSE");
        assert_eq!(json["analysis_method"], "llm_text");
        assert_eq!(json["bullshit_score"].as_f64().unwrap(), 1.0);
        assert!(json.get("severity").is_none());
    }

    #[test]
    fn clamp_unit_handles_nan() {
        assert_eq!(clamp_unit(f32::NAN), 0.5);
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(0.3), 0.3);
    }
}
