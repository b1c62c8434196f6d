use crate::models::{Claim, Verdict};
use crate::pipeline::fallback::PatternVerifier;
use crate::pipeline::traits::ClaimVerifier;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_secs(20);

/// Full verification pipeline: the remote verifier when configured, bounded
/// by a timeout, and the pattern table for everything else. Never fails.
#[derive(Clone)]
pub struct FactChecker {
    remote: Option<Arc<dyn ClaimVerifier>>,
    fallback: PatternVerifier,
    timeout: Duration,
}

impl FactChecker {
    pub fn new(remote: Option<Arc<dyn ClaimVerifier>>, timeout: Duration) -> Self {
        Self {
            remote,
            fallback: PatternVerifier,
            timeout,
        }
    }

    pub fn fallback_only() -> Self {
        Self::new(None, DEFAULT_VERIFY_TIMEOUT)
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub async fn verify(&self, claim: &str, context: &str) -> Verdict {
        let Some(remote) = &self.remote else {
            return self.fallback.verify(claim);
        };

        match tokio::time::timeout(self.timeout, remote.verify(claim, context)).await {
            Ok(Ok(verdict)) => verdict,
            Ok(Err(err)) => {
                warn!("remote verification failed, using pattern fallback: {err:#}");
                self.fallback.verify(claim)
            }
            Err(_) => {
                warn!(
                    "remote verification timed out after {:?}, using pattern fallback",
                    self.timeout
                );
                self.fallback.verify(claim)
            }
        }
    }

    pub async fn verify_claim(&self, claim: &Claim) -> Verdict {
        self.verify(&claim.text, claim.context_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisMethod, VerdictLabel};
    use crate::pipeline::mock::{FailingChat, ScriptedChat, StalledChat};
    use crate::pipeline::LlmVerifier;

    const PITCH: &str = "We're working with 12 Fortune 500 companies including Goldman Sachs";

    fn with_chat(chat: Arc<dyn crate::pipeline::ChatModel>, timeout: Duration) -> FactChecker {
        FactChecker::new(Some(Arc::new(LlmVerifier::new(chat))), timeout)
    }

    #[tokio::test]
    async fn no_credentials_uses_pattern_table() {
        let v = FactChecker::fallback_only().verify(PITCH, "").await;
        assert_eq!(v.label, VerdictLabel::False);
        assert_eq!(v.bullshit_score, 0.9);
        assert_eq!(v.analysis_method, AnalysisMethod::LocalFallback);
        assert_eq!(v.bullshit_type.as_deref(), Some("fake_customers"));
    }

    #[tokio::test]
    async fn remote_error_degrades_to_fallback() {
        let checker = with_chat(Arc::new(FailingChat), Duration::from_secs(5));
        let v = checker.verify(PITCH, "").await;
        assert_eq!(v.analysis_method, AnalysisMethod::LocalFallback);
        assert_eq!(v.bullshit_score, 0.9);
    }

    #[tokio::test]
    async fn remote_timeout_degrades_to_fallback() {
        let checker = with_chat(
            Arc::new(StalledChat(Duration::from_secs(30))),
            Duration::from_millis(20),
        );
        let v = checker.verify("We have 40 paying customers", "").await;
        assert_eq!(v.analysis_method, AnalysisMethod::LocalFallback);
        assert_eq!(v.label, VerdictLabel::Unverifiable);
    }

    #[tokio::test]
    async fn remote_reply_is_used_when_available() {
        let chat = Arc::new(ScriptedChat::new(
            r#"{"is_bullshit": false, "confidence_score": 0.8, "verdict": "TRUE"}"#,
        ));
        let checker = with_chat(chat.clone(), Duration::from_secs(5));
        let claim = Claim::new(PITCH).with_context("intro");
        let v = checker.verify_claim(&claim).await;
        assert_eq!(v.analysis_method, AnalysisMethod::LlmJson);
        assert_eq!(v.label, VerdictLabel::True);
        assert_eq!(chat.calls(), 1);
    }

    #[tokio::test]
    async fn every_claim_yields_a_bounded_verdict() {
        let checkers = [
            FactChecker::fallback_only(),
            with_chat(Arc::new(FailingChat), Duration::from_secs(1)),
            with_chat(
                Arc::new(ScriptedChat::new(r#"{"confidence_score": -4}"#)),
                Duration::from_secs(1),
            ),
            with_chat(Arc::new(ScriptedChat::new("???")), Duration::from_secs(1)),
        ];
        for checker in &checkers {
            for claim in [PITCH, "x", "Our TAM is 3 trillion", "ünïcödé claim"] {
                let v = checker.verify(claim, "").await;
                assert!((0.0..=1.0).contains(&v.bullshit_score));
                assert!(matches!(
                    v.label,
                    VerdictLabel::True
                        | VerdictLabel::False
                        | VerdictLabel::Misleading
                        | VerdictLabel::Unverifiable
                ));
            }
        }
    }
}
