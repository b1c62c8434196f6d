use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const SUSPICIOUS_PHRASES: &[&str] = &[
    "bullshit",
    "false",
    "fabricated",
    "impossible",
    "suspicious",
    "misleading",
];

/// The JSON object the analysis prompt asks for. Fields are read loosely:
/// nulls count as absent, numbers and booleans may arrive as strings, and a
/// lone string stands in for a one-element list. The aliases cover the older
/// prompt wording (`confidence`, `challenge_question`, `sources`).
#[derive(Debug, Default)]
pub struct LlmAnalysis {
    pub is_bullshit: Option<bool>,
    pub confidence_score: Option<f32>,
    pub verdict: Option<String>,
    pub bullshit_type: Option<String>,
    pub severity: Option<String>,
    pub explanation: Option<String>,
    pub red_flags: Vec<String>,
    pub reality_check: Option<String>,
    pub voice_agent_response: Option<String>,
    pub should_interrupt: Option<bool>,
    pub sources_checked: Vec<String>,
}

impl LlmAnalysis {
    /// Any JSON object found in `raw` yields an analysis, however its fields
    /// are typed. `None` means the reply held no object at all.
    pub fn parse(raw: &str) -> Option<Self> {
        parse_json_object::<Map<String, Value>>(raw).map(|obj| Self::from_object(&obj))
    }

    pub fn from_object(obj: &Map<String, Value>) -> Self {
        let field = |names: &[&str]| {
            names
                .iter()
                .filter_map(|n| obj.get(*n))
                .find(|v| !v.is_null())
        };
        Self {
            is_bullshit: field(&["is_bullshit"]).and_then(loose_bool),
            confidence_score: field(&["confidence_score", "confidence"]).and_then(loose_f32),
            verdict: field(&["verdict"]).and_then(loose_text),
            bullshit_type: field(&["bullshit_type"]).and_then(loose_text),
            severity: field(&["severity"]).and_then(loose_text),
            explanation: field(&["explanation"]).and_then(loose_text),
            red_flags: field(&["red_flags"]).map(loose_list).unwrap_or_default(),
            reality_check: field(&["reality_check"]).and_then(loose_text),
            voice_agent_response: field(&["voice_agent_response", "challenge_question"])
                .and_then(loose_text),
            should_interrupt: field(&["should_interrupt"]).and_then(loose_bool),
            sources_checked: field(&["sources_checked", "sources"])
                .map(loose_list)
                .unwrap_or_default(),
        }
    }
}

fn loose_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn loose_f32(v: &Value) -> Option<f32> {
    match v {
        Value::Number(n) => n.as_f64().map(|f| f as f32),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn loose_bool(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    }
}

fn loose_list(v: &Value) -> Vec<String> {
    match v {
        Value::Array(items) => items.iter().filter_map(loose_text).collect(),
        other => loose_text(other).into_iter().collect(),
    }
}

/// Parse `raw` as a JSON object of type `T`: first the whole body, then every
/// balanced `{...}` span in order of appearance until one parses.
pub fn parse_json_object<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') {
        if let Ok(v) = serde_json::from_str::<T>(trimmed) {
            return Some(v);
        }
    }
    let mut from = 0;
    while let Some((start, end)) = balanced_object_span(trimmed, from) {
        if let Ok(v) = serde_json::from_str::<T>(&trimmed[start..end]) {
            return Some(v);
        }
        from = start + 1;
    }
    None
}

/// Byte span of the first balanced object starting at or after `from`.
/// Braces inside string literals do not count toward nesting.
fn balanced_object_span(text: &str, from: usize) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let start = from + text.get(from..)?.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((start, i + 1));
                }
            }
            _ => {}
        }
    }
    None
}

/// Last-resort reading of a reply that carried no usable JSON.
pub fn reads_as_bullshit(text: &str) -> bool {
    let lower = text.to_lowercase();
    SUSPICIOUS_PHRASES.iter().any(|p| lower.contains(p))
}

pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_body() {
        let a = LlmAnalysis::parse(r#"{"is_bullshit": true, "confidence_score": 0.9}"#).unwrap();
        assert_eq!(a.is_bullshit, Some(true));
        assert_eq!(a.confidence_score, Some(0.9));
    }

    #[test]
    fn finds_object_inside_prose_with_nested_braces() {
        let raw = "Sure! Here is my analysis:\n```json\n{\"verdict\": \"FALSE\", \"explanation\": \"they said {trust me}\", \"extra\": {\"a\": 1}}\n```\nHope that helps {really}.";
        let a = LlmAnalysis::parse(raw).unwrap();
        assert_eq!(a.verdict.as_deref(), Some("FALSE"));
        assert_eq!(a.explanation.as_deref(), Some("they said {trust me}"));
    }

    #[test]
    fn skips_unparsable_span_and_tries_the_next() {
        let raw = "{not json} then {\"verdict\": \"TRUE\"}";
        let a = LlmAnalysis::parse(raw).unwrap();
        assert_eq!(a.verdict.as_deref(), Some("TRUE"));
    }

    #[test]
    fn unbalanced_reply_yields_none() {
        assert!(LlmAnalysis::parse("{\"verdict\": \"FALSE\"").is_none());
        assert!(LlmAnalysis::parse("no json here").is_none());
    }

    #[test]
    fn aliases_accept_older_field_names() {
        let a = LlmAnalysis::parse(
            r#"{"confidence": 0.3, "challenge_question": "Proof?", "sources": ["https://x"]}"#,
        )
        .unwrap();
        assert_eq!(a.confidence_score, Some(0.3));
        assert_eq!(a.voice_agent_response.as_deref(), Some("Proof?"));
        assert_eq!(a.sources_checked, vec!["https://x".to_string()]);
    }

    #[test]
    fn nulls_and_stringly_typed_fields_still_parse() {
        let a = LlmAnalysis::parse(
            r#"{"is_bullshit": "false", "confidence_score": "0.9", "verdict": "TRUE",
                "red_flags": null, "sources_checked": null, "should_interrupt": null,
                "explanation": null}"#,
        )
        .unwrap();
        assert_eq!(a.is_bullshit, Some(false));
        assert_eq!(a.confidence_score, Some(0.9));
        assert!(a.red_flags.is_empty());
        assert!(a.sources_checked.is_empty());
        assert_eq!(a.should_interrupt, None);
        assert_eq!(a.explanation, None);
    }

    #[test]
    fn lone_string_counts_as_one_element_list() {
        let a = LlmAnalysis::parse(r#"{"red_flags": "no named customers"}"#).unwrap();
        assert_eq!(a.red_flags, vec!["no named customers".to_string()]);
    }

    #[test]
    fn top_level_array_is_not_an_analysis() {
        assert!(LlmAnalysis::parse("[1, 2, 3]").is_none());
    }

    #[test]
    fn free_text_classifier() {
        assert!(reads_as_bullshit("This looks FABRICATED to me."));
        assert!(!reads_as_bullshit("Plausible for a seed-stage company."));
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("abc", 3), "abc");
    }
}
