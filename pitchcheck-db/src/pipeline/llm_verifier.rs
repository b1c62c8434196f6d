use crate::models::{clamp_unit, AnalysisMethod, Citation, Verdict, VerdictLabel};
use crate::pipeline::parse::{reads_as_bullshit, truncate_chars, LlmAnalysis};
use crate::pipeline::traits::{ChatModel, ClaimVerifier};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const SYSTEM_PROMPT: &str = "You are an expert startup pitch analyzer and fact-checker with deep knowledge of:

STARTUP ECOSYSTEM KNOWLEDGE:
- Typical early-stage company metrics versus impossible claims
- Common pitch fabrications: fake enterprise customers, inflated revenue, impossible scale
- Realistic funding patterns and suspicious investment claims
- Current AI and software capabilities versus impossible claims
- Market sizing reality: no single market is $20T, global GDP is roughly $100T
- How partnerships with big tech companies actually work

FLAG AS BULLSHIT:
- Revenue: $50M ARR in six months for an unknown startup
- Customers: \"Fortune 500 companies\" without specific names
- Partnerships: \"working with Google/Microsoft\" without an announcement
- Performance: above 99% accuracy on technical benchmarks
- Markets: multi-trillion dollar markets
- Funding: large rounds from famous firms that were never announced

DO NOT FLAG:
- Normal AI capabilities such as code suggestions or test generation
- Standard SaaS metrics with reasonable growth and retention
- Legitimate team backgrounds such as engineers from large tech companies
- Seed or Series A rounds of reasonable size

Be conservative: only flag obvious lies and impossible claims.";

fn build_user_prompt(claim: &str, context: &str) -> String {
    let context_line = if context.trim().is_empty() {
        String::new()
    } else {
        format!("\nCONTEXT: {}\n", context.trim())
    };
    format!(
        r#"Analyze this startup pitch claim as a skeptical investor listening to the pitch:

CLAIM: "{claim}"
{context_line}
Reply with ONLY a JSON object in this exact shape:
{{
    "is_bullshit": true/false,
    "confidence_score": 0.0-1.0,
    "verdict": "TRUE/FALSE/MISLEADING/UNVERIFIABLE",
    "bullshit_type": "fake_partnerships/impossible_metrics/inflated_numbers/team_lies/market_fiction/funding_lies/other",
    "severity": "low/medium/high/extreme",
    "explanation": "why this is or isn't bullshit",
    "red_flags": ["specific red flags"],
    "reality_check": "what would be realistic instead",
    "voice_agent_response": "what a skeptical judge would say when interrupting, in natural confrontational speech",
    "should_interrupt": true/false,
    "sources_checked": ["URLs or sources consulted"]
}}

For voice_agent_response: above 0.85 confidence open with "Bullshiiiit!" and demand specifics; between 0.7 and 0.85 interrupt firmly and ask for proof; below that stay skeptical but calm."#
    )
}

/// Remote-model verifier. Returns `Err` only when the model call itself
/// fails; unusable replies still produce a verdict.
pub struct LlmVerifier {
    chat: Arc<dyn ChatModel>,
}

impl LlmVerifier {
    pub fn new(chat: Arc<dyn ChatModel>) -> Self {
        Self { chat }
    }
}

#[async_trait]
impl ClaimVerifier for LlmVerifier {
    async fn verify(&self, claim: &str, context: &str) -> anyhow::Result<Verdict> {
        let reply = self
            .chat
            .complete(SYSTEM_PROMPT, &build_user_prompt(claim, context))
            .await?;
        let content = reply.content.trim();

        match LlmAnalysis::parse(content) {
            Some(analysis) => Ok(verdict_from_analysis(claim, analysis, reply.citations)),
            None => {
                debug!("model reply carried no JSON object, classifying free text");
                Ok(verdict_from_text(claim, content, reply.citations))
            }
        }
    }
}

pub fn verdict_from_analysis(claim: &str, a: LlmAnalysis, citations: Vec<Citation>) -> Verdict {
    let label = a
        .verdict
        .as_deref()
        .map(VerdictLabel::parse_lenient)
        .unwrap_or(VerdictLabel::Unverifiable);
    let is_bullshit = a.is_bullshit.unwrap_or_else(|| label.leans_false());
    let confidence = a
        .confidence_score
        .filter(|c| c.is_finite())
        .map(clamp_unit)
        .unwrap_or(0.5);
    let score = if is_bullshit {
        confidence
    } else {
        1.0 - confidence
    };

    let mut sources = a.sources_checked;
    if sources.is_empty() {
        sources = citations.iter().map(|c| c.url.clone()).collect();
    }

    let mut v = Verdict::new(claim, label, score, AnalysisMethod::LlmJson);
    v.confidence = confidence;
    v.explanation = a
        .explanation
        .unwrap_or_else(|| "Analysis completed".to_string());
    v.red_flags = a.red_flags;
    v.reality_check = a.reality_check.unwrap_or_default();
    v.voice_response = a.voice_agent_response.unwrap_or_default();
    v.should_interrupt = a.should_interrupt.unwrap_or(false);
    v.bullshit_type = Some(a.bullshit_type.unwrap_or_else(|| "unknown".to_string()));
    v.severity = Some(a.severity.unwrap_or_else(|| "medium".to_string()));
    v.sources = sources;
    v.citations = citations;
    v
}

pub fn verdict_from_text(claim: &str, text: &str, citations: Vec<Citation>) -> Verdict {
    let is_bullshit = reads_as_bullshit(text);
    let (label, score, voice) = if is_bullshit {
        (
            VerdictLabel::False,
            0.8,
            "This claim appears suspicious and needs verification.",
        )
    } else {
        (
            VerdictLabel::Unverifiable,
            0.4,
            "Please provide sources for verification.",
        )
    };

    let mut v = Verdict::new(claim, label, score, AnalysisMethod::LlmText);
    v.confidence = 0.7;
    v.explanation = truncate_chars(text, 400);
    v.voice_response = voice.to_string();
    v.should_interrupt = is_bullshit;
    v.sources = citations.iter().map(|c| c.url.clone()).collect();
    v.citations = citations;
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::mock::ScriptedChat;

    fn verifier(reply: &str) -> LlmVerifier {
        LlmVerifier::new(Arc::new(ScriptedChat::new(reply)))
    }

    #[tokio::test]
    async fn json_reply_scores_confidence_when_bullshit() {
        let v = verifier(
            r#"{"is_bullshit": true, "confidence_score": 0.92, "verdict": "FALSE",
                "bullshit_type": "fake_partnerships", "severity": "high",
                "explanation": "No such partnership exists.", "red_flags": ["unnamed partner"],
                "reality_check": "A pilot at most.", "voice_agent_response": "Bullshiiiit!",
                "should_interrupt": true, "sources_checked": []}"#,
        )
        .verify("We partner with Google", "")
        .await
        .unwrap();
        assert_eq!(v.label, VerdictLabel::False);
        assert!((v.bullshit_score - 0.92).abs() < 1e-6);
        assert_eq!(v.analysis_method, AnalysisMethod::LlmJson);
        assert_eq!(v.red_flags, vec!["unnamed partner".to_string()]);
        assert!(v.should_interrupt);
        assert_eq!(v.bullshit_type.as_deref(), Some("fake_partnerships"));
    }

    #[tokio::test]
    async fn json_reply_with_null_lists_keeps_model_judgement() {
        let v = verifier(
            r#"{"is_bullshit": false, "confidence_score": 0.9, "verdict": "TRUE",
                "red_flags": null, "sources_checked": null, "should_interrupt": false,
                "explanation": "Seed rounds of this size are common."}"#,
        )
        .verify("We raised a $2M seed round", "")
        .await
        .unwrap();
        assert_eq!(v.label, VerdictLabel::True);
        assert_eq!(v.analysis_method, AnalysisMethod::LlmJson);
        assert!((v.bullshit_score - 0.1).abs() < 1e-6);
        assert!(v.red_flags.is_empty());
        assert!(!v.should_interrupt);
    }

    #[tokio::test]
    async fn json_reply_with_string_confidence_keeps_model_judgement() {
        let v = verifier(r#"{"is_bullshit": "false", "confidence_score": "0.9", "verdict": "TRUE"}"#)
            .verify("We raised a $2M seed round", "")
            .await
            .unwrap();
        assert_eq!(v.label, VerdictLabel::True);
        assert_eq!(v.analysis_method, AnalysisMethod::LlmJson);
        assert!((v.bullshit_score - 0.1).abs() < 1e-6);
        assert!((v.confidence - 0.9).abs() < 1e-6);
    }

    #[tokio::test]
    async fn json_reply_inverts_confidence_when_not_bullshit() {
        let v = verifier(r#"{"is_bullshit": false, "confidence_score": 0.9, "verdict": "TRUE"}"#)
            .verify("We raised a $2M seed round", "")
            .await
            .unwrap();
        assert_eq!(v.label, VerdictLabel::True);
        assert!((v.bullshit_score - 0.1).abs() < 1e-6);
        assert_eq!(v.severity.as_deref(), Some("medium"));
    }

    #[tokio::test]
    async fn out_of_range_confidence_is_clamped() {
        let v = verifier(r#"{"is_bullshit": false, "confidence_score": 3.5, "verdict": "TRUE"}"#)
            .verify("claim", "")
            .await
            .unwrap();
        assert_eq!(v.confidence, 1.0);
        assert_eq!(v.bullshit_score, 0.0);
    }

    #[tokio::test]
    async fn missing_is_bullshit_follows_label() {
        let v = verifier(r#"{"confidence_score": 0.8, "verdict": "MISLEADING"}"#)
            .verify("claim", "")
            .await
            .unwrap();
        assert!((v.bullshit_score - 0.8).abs() < 1e-6);
    }

    #[tokio::test]
    async fn prose_reply_falls_to_text_classifier() {
        let v = verifier("Honestly this sounds fabricated.")
            .verify("claim", "")
            .await
            .unwrap();
        assert_eq!(v.analysis_method, AnalysisMethod::LlmText);
        assert_eq!(v.label, VerdictLabel::False);
        assert_eq!(v.bullshit_score, 0.8);

        let v = verifier("Seems plausible for the stage.")
            .verify("claim", "")
            .await
            .unwrap();
        assert_eq!(v.label, VerdictLabel::Unverifiable);
        assert_eq!(v.bullshit_score, 0.4);
    }

    #[tokio::test]
    async fn citations_fill_sources() {
        let chat = ScriptedChat::new(r#"{"is_bullshit": true, "confidence_score": 0.75}"#)
            .with_citations(vec![Citation {
                url: "https://example.com/a".into(),
                title: "A".into(),
                used_at: "x".into(),
            }]);
        let v = LlmVerifier::new(Arc::new(chat))
            .verify("claim", "")
            .await
            .unwrap();
        assert_eq!(v.sources, vec!["https://example.com/a".to_string()]);
        assert_eq!(v.citations.len(), 1);
    }

    #[test]
    fn prompt_embeds_claim_and_optional_context() {
        let p = build_user_prompt("We have 10M users", "");
        assert!(p.contains("CLAIM: \"We have 10M users\""));
        assert!(!p.contains("CONTEXT:"));
        let p = build_user_prompt("We have 10M users", "opening remarks");
        assert!(p.contains("CONTEXT: opening remarks"));
    }
}
