use crate::models::{AnalysisMethod, Verdict, VerdictLabel};

pub const PATTERN_SCORE: f32 = 0.9;
pub const NEUTRAL_SCORE: f32 = 0.5;

pub struct PatternRule {
    pub trigger: &'static str,
    pub bullshit_type: &'static str,
    pub line: &'static str,
}

/// Checked top to bottom; the first trigger found in the claim wins.
pub const PATTERN_RULES: &[PatternRule] = &[
    PatternRule {
        trigger: "trillion",
        bullshit_type: "impossible_market_size",
        line: "Hold on - did you just say trillion? What market is worth trillions?",
    },
    PatternRule {
        trigger: "fortune 500",
        bullshit_type: "fake_customers",
        line: "Stop right there - which Fortune 500 companies exactly? Can you name them?",
    },
    PatternRule {
        trigger: "partnership with google",
        bullshit_type: "fake_partnerships",
        line: "Wait, you have a partnership with Google? Show me the press release.",
    },
    PatternRule {
        trigger: "partnership with microsoft",
        bullshit_type: "fake_partnerships",
        line: "Microsoft partnership? That would be big news. Where's the announcement?",
    },
    PatternRule {
        trigger: "99.",
        bullshit_type: "impossible_performance",
        line: "Hold up - 99% accuracy? That sounds too good to be true. Show me the data.",
    },
    PatternRule {
        trigger: "sequoia",
        bullshit_type: "suspicious_funding",
        line: "Sequoia invested? I haven't seen that anywhere. Can you prove it?",
    },
    PatternRule {
        trigger: "yc invested",
        bullshit_type: "premature_investment",
        line: "Wait, YC invested in you? This is news to me.",
    },
    PatternRule {
        trigger: "goldman sachs",
        bullshit_type: "fake_customers",
        line: "Goldman Sachs is your customer? That's a pretty big claim.",
    },
];

/// Deterministic keyword matcher used when the remote model is missing or
/// fails. Holds no state, so equal input gives an equal verdict.
#[derive(Clone, Copy, Debug, Default)]
pub struct PatternVerifier;

impl PatternVerifier {
    pub fn matching_rule(&self, claim: &str) -> Option<&'static PatternRule> {
        let lower = claim.to_lowercase();
        PATTERN_RULES.iter().find(|r| lower.contains(r.trigger))
    }

    pub fn verify(&self, claim: &str) -> Verdict {
        match self.matching_rule(claim) {
            Some(rule) => {
                let mut v = Verdict::new(
                    claim,
                    VerdictLabel::False,
                    PATTERN_SCORE,
                    AnalysisMethod::LocalFallback,
                );
                v.confidence = 0.85;
                v.explanation = format!(
                    "{} This type of claim is commonly fabricated in startup pitches.",
                    rule.line
                );
                v.red_flags = vec![rule.trigger.to_string()];
                v.voice_response = rule.line.to_string();
                v.should_interrupt = true;
                v.bullshit_type = Some(rule.bullshit_type.to_string());
                v
            }
            None => {
                let mut v = Verdict::new(
                    claim,
                    VerdictLabel::Unverifiable,
                    NEUTRAL_SCORE,
                    AnalysisMethod::LocalFallback,
                );
                v.confidence = 0.6;
                v.explanation = "Claim requires independent verification.".to_string();
                v.voice_response =
                    "This claim needs verification. Can you provide specific sources?".to_string();
                v
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earlier_rule_wins_when_several_match() {
        let v = PatternVerifier.verify("A trillion dollar market served by Fortune 500 buyers");
        assert_eq!(v.bullshit_type.as_deref(), Some("impossible_market_size"));

        let v = PatternVerifier
            .verify("We're working with 12 Fortune 500 companies including Goldman Sachs");
        assert_eq!(v.label, VerdictLabel::False);
        assert_eq!(v.bullshit_score, PATTERN_SCORE);
        assert_eq!(v.bullshit_type.as_deref(), Some("fake_customers"));
        assert!(v.voice_response.starts_with("Stop right there"));
    }

    #[test]
    fn matching_is_deterministic() {
        let claim = "Our model hits 99.7% accuracy";
        let a = PatternVerifier.verify(claim);
        let b = PatternVerifier.verify(claim);
        assert_eq!(a.label, b.label);
        assert_eq!(a.bullshit_score, b.bullshit_score);
        assert_eq!(a.voice_response, b.voice_response);
        assert_eq!(a.bullshit_type.as_deref(), Some("impossible_performance"));
    }

    #[test]
    fn no_match_is_neutral() {
        let v = PatternVerifier.verify("We launched our beta in March");
        assert_eq!(v.label, VerdictLabel::Unverifiable);
        assert_eq!(v.bullshit_score, NEUTRAL_SCORE);
        assert!(!v.should_interrupt);
        assert_eq!(v.analysis_method, AnalysisMethod::LocalFallback);
    }
}
